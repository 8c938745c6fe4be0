use bytes::Bytes;

/// Attachment payload as submitted by a form, or as read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDto {
    pub name: String,
    pub content: Bytes,
}

impl FileDto {
    pub fn new(name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// An empty payload means "keep the current attachment" on update.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
