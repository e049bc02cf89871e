//! Browser download sink.
//!
//! Wraps the document in a `Blob`, points a temporary `<a download>` at its
//! object URL and clicks it.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

use crate::error::{GridMergeError, Result};
use crate::export::{ExportFile, FileSink};

pub(crate) struct BrowserDownload<'a> {
    document: &'a Document,
}

impl<'a> BrowserDownload<'a> {
    pub(crate) fn new(document: &'a Document) -> Self {
        Self { document }
    }
}

fn js_err(e: JsValue) -> GridMergeError {
    GridMergeError::Export(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl FileSink for BrowserDownload<'_> {
    fn save(&mut self, file: &ExportFile<'_>) -> Result<()> {
        let parts = js_sys::Array::of1(&JsValue::from_str(file.contents));
        let options = BlobPropertyBag::new();
        options.set_type(file.mime);
        let blob = Blob::new_with_str_sequence_and_options(&parts, &options).map_err(js_err)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

        let anchor: HtmlAnchorElement = self
            .document
            .create_element("a")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| GridMergeError::Export("could not create download link".into()))?;
        anchor.set_href(&url);
        anchor.set_download(file.name);
        let _ = anchor.style().set_property("display", "none");

        let body = self
            .document
            .body()
            .ok_or_else(|| GridMergeError::Export("document has no body".into()))?;
        body.append_child(&anchor).map_err(js_err)?;
        anchor.click();
        let _ = body.remove_child(&anchor);
        let _ = Url::revoke_object_url(&url);

        tracing::info!(name = file.name, bytes = file.contents.len(), "download offered");
        Ok(())
    }
}
