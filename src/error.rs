use crate::{ValidationIssue, ValidationIssues};
use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Display, From)]
pub enum Error {
	#[from(String, &String, &str)]
	Custom(String),

	// -- Parse
	#[display("<{element}> is missing its <{tag}> element")]
	ParseMissingElement { element: &'static str, tag: &'static str },

	#[display("Unknown file operation '{operation}' (expected CREATE, UPDATE, or DELETE)")]
	ParseUnknownOperation { operation: String },

	#[display("Invalid CODE_CHANGES block: {issues}")]
	InvalidCodeChanges { issues: ValidationIssues },

	// -- Apply
	#[display("Path '{target}' is outside of base directory '{base_dir}'")]
	SecurityViolation { target: String, base_dir: String },

	#[display("File does not exist: '{path}'")]
	ApplyFileNotFound { path: String },

	// -- Io
	#[display("Cannot read file '{path}'. Cause: {cause}")]
	IoReadFile { path: String, cause: std::io::Error },

	#[display("Cannot write file '{path}'. Cause: {cause}")]
	IoWriteFile { path: String, cause: std::io::Error },

	#[display("Cannot delete file '{path}'. Cause: {cause}")]
	IoDeleteFile { path: String, cause: std::io::Error },

	// -- Externals
	#[from]
	Io(std::io::Error),

	#[from]
	SimpleFs(simple_fs::Error),
}

// region:    --- Constructors

impl Error {
	pub fn parse_missing_element(element: &'static str, tag: &'static str) -> Self {
		Self::ParseMissingElement { element, tag }
	}

	pub fn parse_unknown_operation(operation: impl Into<String>) -> Self {
		Self::ParseUnknownOperation {
			operation: operation.into(),
		}
	}

	pub fn invalid_code_changes(issues: Vec<ValidationIssue>) -> Self {
		Self::InvalidCodeChanges {
			issues: ValidationIssues(issues),
		}
	}

	pub fn security_violation(target: impl Into<String>, base_dir: impl Into<String>) -> Self {
		Self::SecurityViolation {
			target: target.into(),
			base_dir: base_dir.into(),
		}
	}

	pub fn apply_file_not_found(path: impl Into<String>) -> Self {
		Self::ApplyFileNotFound { path: path.into() }
	}

	pub fn io_read_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::IoReadFile {
			path: path.into(),
			cause,
		}
	}

	pub fn io_write_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::IoWriteFile {
			path: path.into(),
			cause,
		}
	}

	pub fn io_delete_file(path: impl Into<String>, cause: std::io::Error) -> Self {
		Self::IoDeleteFile {
			path: path.into(),
			cause,
		}
	}

	pub fn simple_fs(err: simple_fs::Error) -> Self {
		Self::SimpleFs(err)
	}
}

// endregion: --- Constructors

// region:    --- Error Boilerplate

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
