pub mod download;
pub mod guests;
pub mod qr;
pub mod stats;
pub mod xlsx;

pub use download::{Attachment, DownloadFormat};
pub use guests::{GuestRecord, ImportError, export_guests_csv, import_guests_csv};
pub use qr::{generate_qr_code, qr_file_name};
pub use stats::event_statistics;
pub use xlsx::export_guests_xlsx;
