use pepcore::algorithm::average::{average_spectra, AveragingConfig};
use pepcore::algorithm::fragment::generate_b_y_ions;
use pepcore::algorithm::matching::assemble_summary;
use pepcore::chemistry::amino_acid::ResidueMasses;
use pepcore::chemistry::modification::TerminalMod;
use pepcore::data::spectrum::MzSpectrum;
use pepcore::error::PepcoreError;

fn main() -> Result<(), PepcoreError> {
    // Example: match the singly charged PEPTIDE b/y series against two
    // synthetic repeat scans of the same fragment spectrum.
    let masses = ResidueMasses::new();
    let ions = generate_b_y_ions("PEPTIDE", &[1], &masses, TerminalMod::None)?;

    let mut mz: Vec<f64> = ions.iter().map(|ion| ion.mz).collect();
    mz.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let scan_a = MzSpectrum::new(mz.clone(), vec![100.0; mz.len()]);
    let scan_b = MzSpectrum::new(mz, vec![150.0; ions.len()]);

    let consensus = average_spectra(&[scan_a, scan_b], &AveragingConfig::default())?;
    let rows = assemble_summary(&consensus, &ions, 10.0)?;

    println!("{}", consensus);
    for row in &rows {
        println!(
            "{:8} theo: {:10.4} obs: {:10.4} ppm: {:6.2} intensity: {:8.1}",
            row.label,
            row.theoretical_mz,
            row.observed_mz.unwrap_or(f64::NAN),
            row.ppm.unwrap_or(f64::NAN),
            row.intensity
        );
    }
    Ok(())
}
