//! Byte stream carrying the saved image to the handler
//!
//! The stream owns whatever backs it (an HTTP response body or a spooled
//! upload). Dropping it releases that resource, so a handler that fails
//! halfway through reading still frees the connection or file.

use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures::stream::{BoxStream, Stream, StreamExt};
use tokio::io::AsyncRead;
use tokio_util::io::{ReaderStream, StreamReader};

/// Where the image bytes come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageOrigin {
    /// Fetched from the URL given in a GET callback
    Url(String),
    /// Uploaded as the `image` file part of a POST callback
    Upload { file_name: Option<String> },
}

pub struct ImageStream {
    inner: BoxStream<'static, io::Result<Bytes>>,
    content_type: Option<String>,
    origin: ImageOrigin,
}

impl ImageStream {
    pub fn from_stream<S>(stream: S, origin: ImageOrigin) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        Self {
            inner: stream.boxed(),
            content_type: None,
            origin,
        }
    }

    pub fn from_reader<R>(reader: R, origin: ImageOrigin) -> Self
    where
        R: AsyncRead + Send + 'static,
    {
        Self::from_stream(ReaderStream::new(reader), origin)
    }

    /// In-memory stream, mostly useful for handlers under test
    pub fn from_bytes(data: impl Into<Bytes>, origin: ImageOrigin) -> Self {
        let data = data.into();
        Self::from_stream(futures::stream::once(async move { Ok(data) }), origin)
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Content type reported by the sender, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn origin(&self) -> &ImageOrigin {
        &self.origin
    }

    pub fn into_async_read(self) -> impl AsyncRead + Send + Unpin {
        StreamReader::new(self.inner)
    }

    /// Drain the stream into memory
    pub async fn read_to_end(mut self) -> io::Result<Bytes> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.inner.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }
}

impl Stream for ImageStream {
    type Item = io::Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.poll_next_unpin(cx)
    }
}

impl fmt::Debug for ImageStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageStream")
            .field("origin", &self.origin)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}
