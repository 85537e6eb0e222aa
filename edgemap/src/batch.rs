//! Batch driver
//!
//! Applies every operator of a registry to every input image and writes
//! one PNG per (image, operator) pair as `{out_dir}/{name}_{label}.png`.
//!
//! All inputs are decoded before any output is written, so an unreadable
//! input aborts the batch without leaving partial results behind. With the
//! `parallel` feature the cross product is spread over the rayon pool; the
//! report keeps input order, then registry order, either way.

use std::fs;
use std::path::{Path, PathBuf};

use edgemap_core::ScalarField;
use edgemap_filter::{FilterError, OperatorDefinition, OperatorKind, OperatorRegistry, apply};
use edgemap_io::IoError;
use log::{debug, info};
use thiserror::Error;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Errors that abort a batch run
#[derive(Debug, Error)]
pub enum BatchError {
    /// The input name cannot be used to build output file names
    #[error("invalid input name '{0}'")]
    InvalidName(String),

    /// Two inputs share a name and would write the same output files
    #[error("duplicate input name '{name}' ({} and {})", .first.display(), .second.display())]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// The output directory could not be created
    #[error("failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input image could not be read
    #[error("failed to load '{name}' from {}: {source}", .path.display())]
    Load {
        name: String,
        path: PathBuf,
        source: IoError,
    },

    /// An operator rejected an input
    #[error("{operator} failed on '{name}': {source}")]
    Filter {
        name: String,
        operator: OperatorKind,
        source: FilterError,
    },

    /// An edge map could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: IoError },
}

/// Result type for batch operations
pub type BatchResult<T> = Result<T, BatchError>;

/// One image to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchInput {
    /// Prefix of every output file produced from this input
    pub name: String,
    pub path: PathBuf,
}

impl BatchInput {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Use the file stem of `path` as the input name.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidName`] if the path has no UTF-8 stem.
    pub fn from_path(path: impl Into<PathBuf>) -> BatchResult<Self> {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| BatchError::InvalidName(path.display().to_string()))?
            .to_string();
        Ok(Self { name, path })
    }

    fn validate(&self) -> BatchResult<()> {
        if self.name.is_empty() || self.name.contains(['/', '\\']) {
            return Err(BatchError::InvalidName(self.name.clone()));
        }
        Ok(())
    }
}

/// One written edge map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutput {
    pub input: String,
    pub operator: OperatorKind,
    pub path: PathBuf,
}

/// Everything a batch run wrote, in input order then registry order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    outputs: Vec<BatchOutput>,
}

impl BatchReport {
    pub fn outputs(&self) -> &[BatchOutput] {
        &self.outputs
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Output file name for an input/operator pair.
pub fn output_file_name(name: &str, operator: OperatorKind) -> String {
    format!("{}_{}.png", name, operator.label())
}

/// Run every operator of `registry` over every input.
///
/// Creates `out_dir` if needed and overwrites existing outputs. Input
/// names must be unique.
///
/// # Errors
///
/// The first failure in input order (then registry order) is returned.
/// Load failures are detected before anything is written.
pub fn run_batch(
    inputs: &[BatchInput],
    registry: &OperatorRegistry,
    out_dir: &Path,
) -> BatchResult<BatchReport> {
    for (i, input) in inputs.iter().enumerate() {
        input.validate()?;
        if let Some(prev) = inputs[..i].iter().find(|p| p.name == input.name) {
            return Err(BatchError::DuplicateName {
                name: input.name.clone(),
                first: prev.path.clone(),
                second: input.path.clone(),
            });
        }
    }

    fs::create_dir_all(out_dir).map_err(|source| BatchError::CreateDir {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let fields = map_jobs(inputs, load_input)
        .into_iter()
        .collect::<BatchResult<Vec<_>>>()?;

    let jobs: Vec<(&BatchInput, &ScalarField, &OperatorDefinition)> = inputs
        .iter()
        .zip(&fields)
        .flat_map(|(input, field)| registry.iter().map(move |op| (input, field, op)))
        .collect();
    debug!(
        "{} inputs x {} operators = {} edge maps",
        inputs.len(),
        registry.len(),
        jobs.len()
    );

    let outputs = map_jobs(&jobs, |&(input, field, op)| {
        render_one(input, field, op, out_dir)
    })
    .into_iter()
    .collect::<BatchResult<Vec<_>>>()?;

    Ok(BatchReport { outputs })
}

fn load_input(input: &BatchInput) -> BatchResult<ScalarField> {
    edgemap_io::read_gray_field(&input.path).map_err(|source| BatchError::Load {
        name: input.name.clone(),
        path: input.path.clone(),
        source,
    })
}

fn render_one(
    input: &BatchInput,
    field: &ScalarField,
    op: &OperatorDefinition,
    out_dir: &Path,
) -> BatchResult<BatchOutput> {
    let edges = apply(field, op).map_err(|source| BatchError::Filter {
        name: input.name.clone(),
        operator: op.kind(),
        source,
    })?;

    let path = out_dir.join(output_file_name(&input.name, op.kind()));
    edgemap_io::write_field_png(&edges, &path).map_err(|source| BatchError::Write {
        path: path.clone(),
        source,
    })?;
    info!("wrote {}", path.display());

    Ok(BatchOutput {
        input: input.name.clone(),
        operator: op.kind(),
        path,
    })
}

/// Order-preserving map, on the rayon pool when available.
fn map_jobs<T, U, F>(items: &[T], f: F) -> Vec<U>
where
    T: Sync,
    U: Send,
    F: Fn(&T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        items.par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("kucing", OperatorKind::Roberts), "kucing_Roberts.png");
        assert_eq!(output_file_name("a", OperatorKind::PrewittA), "a_Prewitt.png");
        assert_eq!(output_file_name("a", OperatorKind::PrewittB), "a_Sobel.png");
        assert_eq!(output_file_name("a", OperatorKind::FreiChen), "a_FreiChen.png");
    }

    #[test]
    fn test_input_from_path() {
        let input = BatchInput::from_path("photos/Kucing.jpg").unwrap();
        assert_eq!(input.name, "Kucing");
        assert_eq!(input.path, PathBuf::from("photos/Kucing.jpg"));
        assert!(BatchInput::from_path("/").is_err());
    }

    #[test]
    fn test_invalid_names_rejected_before_io() {
        let registry = OperatorRegistry::standard();
        let out = std::env::temp_dir().join("edgemap_never_created");
        let inputs = [BatchInput::new("", "x.png")];
        assert!(matches!(
            run_batch(&inputs, &registry, &out),
            Err(BatchError::InvalidName(_))
        ));
        let inputs = [BatchInput::new("a/b", "x.png")];
        assert!(run_batch(&inputs, &registry, &out).is_err());
    }

    #[test]
    fn test_map_jobs_keeps_order() {
        let items: Vec<u32> = (0..100).collect();
        let doubled = map_jobs(&items, |&x| x * 2);
        assert_eq!(doubled, (0..100).map(|x| x * 2).collect::<Vec<_>>());
    }
}
