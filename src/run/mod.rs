//! End-to-end runs.
//!
//! This module combines [`crate::parse`], the query API, and [`crate::output`] into a single workflow: read Markdown,
//! select nodes of one type, and print them. It's what the CLI runs, but it can be driven within-process too.
//!
//! ## Example
//!
//! ```
//! # use gquery::run;
//! use gquery::NodeType;
//!
//! // First, let's define a mocked I/O. Replace this with whatever you need.
//! #[derive(Default)]
//! struct MockIo {
//!     stdout: Vec<u8>,
//! }
//!
//! impl run::OsFacade for MockIo {
//!     fn read_stdin(&self) -> std::io::Result<String> {
//!         Ok("- hello\n- world".to_string())
//!     }
//!
//!     fn read_file(&self, path: &str) -> std::io::Result<String> {
//!         Err(std::io::Error::new(std::io::ErrorKind::NotFound, path))
//!     }
//!
//!     fn stdout(&mut self) -> impl std::io::Write {
//!         &mut self.stdout
//!     }
//!
//!     fn write_error(&mut self, err: run::Error) {
//!         eprintln!("{err}")
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut cli_options = run::RunOptions::default();
//! cli_options.node_type = NodeType::ListItem;
//!
//! let mut os_facade = MockIo::default();
//! let found_any = run::run(&cli_options, &mut os_facade);
//! let stdout_text = String::from_utf8(os_facade.stdout)?;
//!
//! assert_eq!(found_any, true);
//! assert_eq!(stdout_text, "list-item \"hello\"\nlist-item \"world\"\n");
//! #
//! #     Ok(())
//! # }
//! ```
mod cli;
mod run_main;

pub use cli::*;
pub use run_main::*;
