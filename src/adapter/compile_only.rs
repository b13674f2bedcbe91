//! Dry-run toolchain: the structural front-end is the whole compilation.

use super::{AdapterError, CompiledUnit, SampleShape, Toolchain};
use crate::registry::Sample;

#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOnlyToolchain;

impl Toolchain for CompileOnlyToolchain {
    fn name(&self) -> &str {
        "compile-only"
    }

    fn compile(&self, sample: &Sample, shape: &SampleShape) -> Result<CompiledUnit, AdapterError> {
        Ok(CompiledUnit {
            sample_id: sample.identifier.clone(),
            qualified_class: shape.qualified_class.clone(),
            tests: shape.tests.clone(),
            artifact_dir: None,
        })
    }

    fn invoke(&self, unit: &CompiledUnit, test_name: &str) -> Result<(), AdapterError> {
        Err(AdapterError::Toolchain(format!(
            "cannot run {}#{test_name}: tests are not executed in compile-only mode",
            unit.qualified_class
        )))
    }

    fn executes_tests(&self) -> bool {
        false
    }
}
