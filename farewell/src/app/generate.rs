use crate::model::FarewellError;
use farewell_core::io::sample_generator::{generate_survey, write_survey};
use std::path::Path;

/// writes a seeded synthetic survey, the same seed always giving the same file
pub fn run_generate(
    output_file: &Path,
    respondents: usize,
    seed: u64,
) -> Result<(), FarewellError> {
    if respondents == 0 {
        return Err(FarewellError::ConfigurationError(String::from(
            "respondents must be positive",
        )));
    }
    let records = generate_survey(respondents, seed);
    write_survey(output_file, &records)?;
    log::info!(
        "wrote {respondents} synthetic respondents (seed {seed}) to {}",
        output_file.to_string_lossy()
    );
    Ok(())
}
