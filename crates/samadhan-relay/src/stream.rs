use crate::error::RelayError;
use crate::frame::DeltaAccumulator;
use futures_util::{Stream, StreamExt};
use std::fmt::Display;

/// Pulls chunks from an event-stream body until it closes and returns the
/// concatenated deltas.
///
/// A chunk error ends the relay with [`RelayError::Stream`]; whatever was
/// accumulated before it is discarded.
pub async fn accumulate_deltas<S, B, E>(stream: S) -> Result<String, RelayError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
{
    let mut stream = std::pin::pin!(stream);
    let mut acc = DeltaAccumulator::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            tracing::error!(error = %e, "event stream failed mid-transfer");
            RelayError::Stream(e.to_string())
        })?;
        acc.feed(chunk.as_ref());
    }

    Ok(acc.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::io;

    #[tokio::test]
    async fn accumulates_until_stream_closes() {
        let chunks: Vec<Result<&[u8], io::Error>> = vec![
            Ok(&b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\ndata: {\"cho"[..]),
            Ok(&b"ices\":[{\"delta\":{\"content\":\"lo\"}}]}"[..]),
        ];
        let text = accumulate_deltas(stream::iter(chunks)).await.unwrap();
        assert_eq!(text, "Hello");
    }

    #[tokio::test]
    async fn chunk_error_is_a_stream_error() {
        let chunks: Vec<Result<&[u8], io::Error>> = vec![
            Ok(&b"data: {\"choices\":[{\"delta\":{\"content\":\"partial\"}}]}\n"[..]),
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset")),
        ];
        let err = accumulate_deltas(stream::iter(chunks)).await.unwrap_err();
        assert!(err.is_stream_error());
        assert!(err.to_string().contains("peer reset"));
    }

    #[tokio::test]
    async fn empty_stream_yields_empty_text() {
        let chunks: Vec<Result<Vec<u8>, io::Error>> = Vec::new();
        let text = accumulate_deltas(stream::iter(chunks)).await.unwrap();
        assert!(text.is_empty());
    }
}
