// --- File: crates/trainpay_firebase/src/logic.rs ---
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::info;
use trainpay_common::{validation_error, ObjectStorage, StoredSlip, TrainpayError};

pub const MISSING_SLIP_OR_FOLDER: &str = "Missing slip file or folderPath";

/// Signed URLs stay valid for exactly ten minutes.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(10 * 60);

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// An uploaded file as received from the multipart body.
#[derive(Debug, Clone)]
pub struct SlipFile {
    pub data: Bytes,
    pub file_name: String,
    pub content_type: String,
}

/// Destination of a slip: the folder and file name joined verbatim.
///
/// Neither part is sanitized, so `..` segments and leading slashes reach the
/// bucket as given, and a second upload with the same name overwrites the first.
pub fn object_path(folder_path: &str, file_name: &str) -> String {
    format!("{folder_path}/{file_name}")
}

/// Stores a slip and returns where it went plus a read URL valid for
/// [`SIGNED_URL_TTL`].
///
/// `clock` is read once the object is saved, so the URL's lifetime starts
/// when it is issued rather than when the upload began.
pub async fn upload_slip<C>(
    storage: &dyn ObjectStorage,
    file: Option<SlipFile>,
    folder_path: Option<String>,
    clock: C,
) -> Result<StoredSlip, TrainpayError>
where
    C: Fn() -> DateTime<Utc>,
{
    let folder_path = folder_path.filter(|folder| !folder.is_empty());
    let (Some(file), Some(folder_path)) = (file, folder_path) else {
        return Err(validation_error(MISSING_SLIP_OR_FOLDER));
    };

    let path = object_path(&folder_path, &file.file_name);
    storage.save(&path, file.data, &file.content_type).await?;

    let issued_at = clock();
    let url = storage
        .signed_read_url(&path, issued_at, SIGNED_URL_TTL)
        .await?;
    info!("[Slip Logic] Uploaded slip to {}", path);

    Ok(StoredSlip { path, url })
}
