use std::io::{self, BufWriter, Write};

use axum::body::Body;
use futures_util::stream;
use tokio::sync::mpsc;

use crate::export::{ExportFormat, Exporter};
use crate::store::TrackDocument;

const CHUNK_SIZE: usize = 16 * 1024;
const CHANNEL_DEPTH: usize = 8;

type Chunk = Result<Vec<u8>, io::Error>;

/// Blocking writer feeding a response body. Writes fail with `BrokenPipe`
/// once the body has been dropped.
pub struct ChannelWriter {
    tx: mpsc::Sender<Chunk>,
}

impl ChannelWriter {
    pub fn new(tx: mpsc::Sender<Chunk>) -> Self {
        Self { tx }
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.tx
            .blocking_send(Ok(buf.to_vec()))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "client disconnected"))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run the encoder on a blocking thread and stream its output as a body.
///
/// An encoder failure after the first chunk ends the body with an error so
/// the client sees a truncated transfer rather than a clean end of stream.
pub fn export_body(exporter: Exporter, format: ExportFormat, document: TrackDocument) -> Body {
    let (tx, rx) = mpsc::channel::<Chunk>(CHANNEL_DEPTH);
    let error_tx = tx.clone();

    tokio::task::spawn_blocking(move || {
        let sink = BufWriter::with_capacity(CHUNK_SIZE, ChannelWriter::new(tx));
        let result =
            exporter.encode_format(format, &document.metadata, &document.points, sink);
        if let Err(e) = result {
            log::warn!(
                "Export of '{}' as {} aborted: {}",
                document.metadata.display_name(),
                format,
                e
            );
            let _ = error_tx.blocking_send(Err(io::Error::other(e.to_string())));
        }
    });

    let chunks = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    });
    Body::from_stream(chunks)
}
