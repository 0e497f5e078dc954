//! One module per subcommand. Each exposes a pure planning step (what to
//! find, where it goes) and a `run` that performs it against the services.

pub mod github_draft;
pub mod hockey;
pub mod s3_upload;
pub mod s3_win_releases;
