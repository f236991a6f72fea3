use sra_growth::fetch::{fetch_csv, SRA_STAT_URL};
use sra_growth::milestones::compute_milestones;
use sra_growth::plot::{parse_cli, plot_growth};
use sra_growth::{DataError, TimeVolume};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let fout = parse_cli();
    println!(
        "fetch SRA statistics from {} and plot to {}",
        SRA_STAT_URL,
        fout.display()
    );
    let body = fetch_csv(SRA_STAT_URL)?;
    let mut tv = TimeVolume::from_csv(&body)?;
    if tv.is_empty() {
        return Err(DataError::Empty.into());
    }
    tv.sort_by_date();
    println!("parsed {} rows", tv.len());
    let milestones = compute_milestones(&tv);
    for m in &milestones {
        println!("5-year doubling milestone: {}", m);
    }
    plot_growth(&tv, &milestones, &fout)?;
    println!("saved plot to {}", fout.display());
    Ok(())
}
