use csv::Writer;

use crate::domain::email_record::EmailRecord;

pub const CSV_FILE_NAME: &str = "marketing_email_list.csv";
pub const CSV_HEADERS: [&str; 4] = ["Search", "Region", "Website", "Email"];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv record: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush csv buffer: {0}")]
    Flush(#[from] std::io::Error),
}

/// UTF-8 csv of the given records, header row first, rows in the given order.
pub fn records_to_csv(records: &[EmailRecord]) -> Result<Vec<u8>, ExportError> {
    log::debug!("Exporting {} email records to csv", records.len());

    let mut wtr = Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADERS)?;

    for record in records.iter().filter(|r| !r.is_sentinel()) {
        wtr.write_record([
            &record.search_topic,
            &record.region,
            &record.source_url,
            &record.email,
        ])?;
    }

    wtr.into_inner().map_err(|e| ExportError::Flush(e.into_error()))
}
