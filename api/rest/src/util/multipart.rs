use actix_multipart::Multipart;
use futures::StreamExt;
use pf_dao::{entity::FieldValues, upload::UploadedFile};
use pf_error::{Error, Result};

/// Drains a `multipart/form-data` body into text values and in-memory uploads.
///
/// A file input the browser sent empty (no name, no bytes) is skipped.
pub async fn read_field_values(mut payload: Multipart) -> Result<FieldValues> {
    let mut values = FieldValues::new();

    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|err| Error::BadRequest(err.to_string()))?;

        let content_disposition = field.content_disposition();
        let name = content_disposition.get_name().unwrap_or_default().to_owned();
        let file_name = content_disposition.get_filename().map(str::to_owned);

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|err| Error::BadRequest(err.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        if name.is_empty() {
            continue;
        }

        match file_name {
            Some(file_name) => {
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                values.insert_upload(&name, UploadedFile::new(Some(file_name), bytes));
            }
            None => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| Error::BadRequest(format!("Field {name} is not valid UTF-8")))?;
                values.insert_text(&name, &text);
            }
        }
    }

    Ok(values)
}
