//! Multipart form extractor
//!
//! Buffers a `multipart/form-data` body into text fields and uploaded
//! files. Parts carrying a file name are files, everything else is text.
//! File parts with no name or no bytes are what browsers send for an empty
//! `<input type="file">` and are dropped.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequest, Multipart, Request},
};
use social_core::FileUpload;

use crate::response::ApiError;

/// Most files a single request may carry
pub const MAX_FILES_PER_REQUEST: usize = 10;

/// Buffered multipart form
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: Vec<(String, FileUpload)>,
}

impl MultipartForm {
    /// Raw text value of a field
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Text value of a field, or an empty string when absent
    pub fn text_or_default(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    /// Trimmed text value; blank counts as absent
    pub fn non_blank(&self, name: &str) -> Option<String> {
        self.text(name)
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    }

    /// Remove and return every file uploaded under one of `names`, in upload order
    pub fn take_files(&mut self, names: &[&str]) -> Vec<FileUpload> {
        let (taken, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut self.files)
            .into_iter()
            .partition(|(field, _)| names.contains(&field.as_str()));
        self.files = rest;
        taken.into_iter().map(|(_, file)| file).collect()
    }

    /// Remove and return a single file; more than one is rejected
    pub fn take_file(&mut self, names: &[&str]) -> Result<Option<FileUpload>, ApiError> {
        let mut files = self.take_files(names);
        if files.len() > 1 {
            return Err(ApiError::invalid_multipart(format!(
                "Only one file may be uploaded as '{}'",
                names.first().copied().unwrap_or("file")
            )));
        }
        Ok(files.pop())
    }

    fn push_file(&mut self, field: String, file: FileUpload) -> Result<(), ApiError> {
        if self.files.len() >= MAX_FILES_PER_REQUEST {
            return Err(ApiError::invalid_multipart(format!(
                "At most {MAX_FILES_PER_REQUEST} files can be uploaded at once"
            )));
        }
        self.files.push((field, file));
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequest<S> for MultipartForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_multipart(e.body_text()))?;

        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::invalid_multipart(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            match field.file_name().map(String::from) {
                Some(file_name) => {
                    let content_type = field.content_type().map(String::from);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::invalid_multipart(e.body_text()))?;

                    if file_name.is_empty() || data.is_empty() {
                        continue;
                    }
                    form.push_file(name, FileUpload::new(file_name, content_type, data.to_vec()))?;
                }
                None => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| ApiError::invalid_multipart(e.body_text()))?;
                    form.fields.insert(name, value);
                }
            }
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> MultipartForm {
        let mut form = MultipartForm::default();
        form.fields.insert("content".to_string(), "  hello  ".to_string());
        form.fields.insert("gender".to_string(), "   ".to_string());
        form.push_file("file".to_string(), FileUpload::new("a.png", None, vec![1])).unwrap();
        form.push_file("photo".to_string(), FileUpload::new("me.png", None, vec![2])).unwrap();
        form.push_file("files".to_string(), FileUpload::new("b.png", None, vec![3])).unwrap();
        form
    }

    #[test]
    fn test_text_fields() {
        let form = form();
        assert_eq!(form.text("content"), Some("  hello  "));
        assert_eq!(form.non_blank("content").as_deref(), Some("hello"));
        assert_eq!(form.non_blank("gender"), None);
        assert_eq!(form.non_blank("missing"), None);
        assert_eq!(form.text_or_default("missing"), "");
    }

    #[test]
    fn test_take_files_keeps_upload_order() {
        let mut form = form();
        let files = form.take_files(&["file", "files"]);
        let names: Vec<_> = files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png"]);

        let photo = form.take_file(&["photo"]).unwrap();
        assert_eq!(photo.map(|f| f.file_name).as_deref(), Some("me.png"));
        assert!(form.take_file(&["photo"]).unwrap().is_none());
    }

    #[test]
    fn test_single_file_field_rejects_many() {
        let mut form = form();
        let err = form.take_file(&["file", "files"]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_MULTIPART");
    }

    #[test]
    fn test_file_count_is_capped() {
        let mut form = MultipartForm::default();
        for i in 0..MAX_FILES_PER_REQUEST {
            form.push_file("file".to_string(), FileUpload::new(format!("{i}.png"), None, vec![0]))
                .unwrap();
        }
        assert!(form
            .push_file("file".to_string(), FileUpload::new("extra.png", None, vec![0]))
            .is_err());
    }
}
