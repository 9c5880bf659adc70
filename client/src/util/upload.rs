//! Image upload batching for the entity forms.
//!
//! DESIGN
//! ======
//! Every file is uploaded with its own request and the requests run
//! concurrently. The batch is all-or-nothing: the first rejection fails the
//! whole batch and no URL from it is returned, even for uploads that already
//! completed.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use futures::future::try_join_all;

use crate::net::api::Uploader;
use crate::net::error::ApiError;

/// A file picked by the user, ready to be sent to the upload endpoint.
#[derive(Clone, Debug)]
pub struct UploadFile {
    pub name: String,
    #[cfg(feature = "hydrate")]
    file: web_sys::File,
}

impl UploadFile {
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn from_browser(file: web_sys::File) -> Self {
        Self { name: file.name(), file }
    }

    #[cfg(feature = "hydrate")]
    pub(crate) fn blob(&self) -> &web_sys::Blob {
        &self.file
    }

    #[cfg(all(test, not(feature = "hydrate")))]
    pub(crate) fn named(name: &str) -> Self {
        Self { name: name.to_owned() }
    }
}

/// Collect the files selected in an `<input type="file">` change event.
#[cfg(feature = "hydrate")]
pub fn files_from_event(ev: &leptos::ev::Event) -> Vec<UploadFile> {
    use wasm_bindgen::JsCast;

    let Some(input) = ev
        .target()
        .and_then(|target| target.dyn_into::<web_sys::HtmlInputElement>().ok())
    else {
        return Vec::new();
    };
    let Some(list) = input.files() else {
        return Vec::new();
    };
    let files = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(UploadFile::from_browser)
        .collect();
    // Reset so picking the same file again fires another change event.
    input.set_value("");
    files
}

/// Upload every file concurrently and return their URLs in input order.
///
/// # Errors
///
/// Returns the first upload failure; URLs of sibling uploads are discarded.
pub async fn upload_all<U>(uploader: &U, files: &[UploadFile]) -> Result<Vec<String>, ApiError>
where
    U: Uploader + ?Sized,
{
    try_join_all(files.iter().map(|file| uploader.upload(file))).await
}
