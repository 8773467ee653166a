//! Per-file orchestration and batch runs.

mod batch;
mod processor;
mod report;

pub use batch::BatchController;
pub use processor::{backup_path, open_image, process, SpriteProcessor, BACKUP_DIR};
pub use report::{
    write_report, BatchReport, BatchSummary, CropRecord, EntryBuilder, ReportEntry, Status,
    REPORT_FILENAME,
};
