pub mod archive_job;
