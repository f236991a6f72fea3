use super::DataError;

/// NCBI endpoint publishing the cumulative SRA growth statistics as csv.
pub const SRA_STAT_URL: &str = "https://www.ncbi.nlm.nih.gov/Traces/sra/sra_stat.cgi";

/// One blocking GET of the stats csv, body returned as text.
/// Unreachable host, non-2xx status and body read failures are all fatal,
/// there is no retry for this one-shot run.
pub fn fetch_csv(url: &str) -> Result<String, DataError> {
    let wrap = |source: reqwest::Error| DataError::Fetch {
        url: url.to_string(),
        source,
    };
    let response = reqwest::blocking::get(url).map_err(wrap)?;
    let response = response.error_for_status().map_err(wrap)?;
    response.text().map_err(wrap)
}
