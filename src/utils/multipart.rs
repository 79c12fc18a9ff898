use std::collections::HashMap;

use actix_multipart::{Field, Multipart};
use entity::proposal_file::FileKind;
use futures_util::TryStreamExt;

use crate::types::error::AppError;
use crate::types::proposal::{NewProposal, UploadedFile};

/// Text fields are short numbers; anything bigger is not a proposal form.
const MAX_TEXT_FIELD_BYTES: usize = 1024;

/// The only text fields kept. Any other part is drained and dropped.
const TEXT_FIELDS: [&str; 3] = ["tender_id", "supplier_id", "proposal_price"];

/// Proposal form after the multipart stream has been drained.
#[derive(Debug, Default)]
pub struct ProposalForm {
    pub fields: HashMap<String, String>,
    pub files: Vec<UploadedFile>,
}

/// Bytes left for the whole form, dropped parts included.
struct Budget {
    cap: usize,
    left: usize,
}

impl Budget {
    fn for_files(max_file_bytes: usize) -> Self {
        let cap = max_file_bytes
            .saturating_mul(FileKind::ALL.len())
            .saturating_add(TEXT_FIELDS.len() * MAX_TEXT_FIELD_BYTES);
        Budget { cap, left: cap }
    }

    fn take(&mut self, n: usize) -> Result<(), AppError> {
        self.left = self.left.checked_sub(n).ok_or_else(|| {
            AppError::PayloadTooLarge(format!("proposal form exceeds {} bytes", self.cap))
        })?;
        Ok(())
    }
}

fn malformed(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest(format!("malformed multipart body: {e}"))
}

async fn read_field(
    field: &mut Field,
    limit: usize,
    budget: &mut Budget,
    name: &str,
) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.take(chunk.len())?;
        if data.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge(format!("{name} exceeds {limit} bytes")));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

async fn skip_field(field: &mut Field, budget: &mut Budget) -> Result<(), AppError> {
    while let Some(chunk) = field.try_next().await.map_err(malformed)? {
        budget.take(chunk.len())?;
    }
    Ok(())
}

/// Keeps the last path segment of a client supplied file name.
fn clean_file_name(raw: &str) -> String {
    raw.rsplit(['/', '\\'])
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("upload")
        .to_string()
}

/// `filename*` (RFC 5987) wins over plain `filename` when both are sent.
fn client_file_name(field: &Field) -> Option<String> {
    let cd = field.content_disposition()?;
    cd.get_filename_ext()
        .map(|ext| String::from_utf8_lossy(&ext.value).into_owned())
        .or_else(|| cd.get_filename().map(str::to_string))
}

impl ProposalForm {
    pub async fn read(mut payload: Multipart, max_file_bytes: usize) -> Result<Self, AppError> {
        let mut form = ProposalForm::default();
        let mut budget = Budget::for_files(max_file_bytes);

        while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
            let name = field.name().unwrap_or_default().to_string();

            if let Some(kind) = FileKind::from_form_field(&name) {
                let file_name = client_file_name(&field)
                    .map(|raw| clean_file_name(&raw))
                    .unwrap_or_else(|| format!("{}.bin", kind.as_str()));
                let content_type = field
                    .content_type()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "application/octet-stream".to_string());
                let data = read_field(&mut field, max_file_bytes, &mut budget, &name).await?;
                // browsers send an empty part for an untouched file input
                if data.is_empty() {
                    continue;
                }
                form.files.retain(|f| f.kind != kind);
                form.files.push(UploadedFile { kind, file_name, content_type, data });
            } else if TEXT_FIELDS.contains(&name.as_str()) {
                let raw = read_field(&mut field, MAX_TEXT_FIELD_BYTES, &mut budget, &name).await?;
                let value = String::from_utf8(raw)
                    .map_err(|_| AppError::BadRequest(format!("{name} is not valid UTF-8")))?;
                form.fields.insert(name, value.trim().to_string());
            } else {
                skip_field(&mut field, &mut budget).await?;
            }
        }

        Ok(form)
    }

    fn required<T: std::str::FromStr>(&self, key: &str) -> Result<T, AppError> {
        let raw = self
            .fields
            .get(key)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Validation(format!("{key} is required")))?;
        raw.parse()
            .map_err(|_| AppError::Validation(format!("{key} must be a number")))
    }

    /// Checks the required numeric fields and hands back a submission.
    pub fn into_submission(self) -> Result<NewProposal, AppError> {
        let tender_id: i32 = self.required("tender_id")?;
        let supplier_id: i32 = self.required("supplier_id")?;
        let price: f64 = self.required("proposal_price")?;
        if !price.is_finite() || price < 0.0 {
            return Err(AppError::Validation("proposal_price must be a non-negative number".into()));
        }

        Ok(NewProposal {
            tender_id,
            supplier_id,
            price,
            files: self.files,
        })
    }
}
