//! Delimited-text encoding of donor and request rows.

use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use csv::StringRecord;

use crate::{
    domain::{BloodRequest, DONOR_FIELDS, Donor},
    storage::{ParseError, ParseErrorKind, StorageError},
};

/// Encodes a single row, quoting fields that contain delimiters.
pub(super) fn encode_row<I, T>(fields: I) -> io::Result<Vec<u8>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(fields).map_err(io::Error::other)?;
    writer.into_inner().map_err(csv::IntoInnerError::into_error)
}

pub(super) fn encode_donor(donor: &Donor) -> io::Result<Vec<u8>> {
    let age = donor.age.to_string();
    encode_row([
        donor.name.as_str(),
        age.as_str(),
        donor.blood_type.as_str(),
        donor.location.as_str(),
        donor.contact.as_str(),
    ])
}

pub(super) fn encode_request(request: &BloodRequest) -> io::Result<Vec<u8>> {
    encode_row([
        request.name.as_str(),
        request.blood_type.as_str(),
        request.location.as_str(),
        request.urgency.as_str(),
    ])
}

fn decode_donor(record: &StringRecord) -> Result<Donor, ParseErrorKind> {
    if record.len() != DONOR_FIELDS.len() {
        return Err(ParseErrorKind::FieldCount {
            expected: DONOR_FIELDS.len(),
            found: record.len(),
        });
    }

    let age = record[1].trim();
    let blood = record[2].trim();

    Ok(Donor {
        name: record[0].to_string(),
        age: age
            .parse()
            .map_err(|_| ParseErrorKind::Age(age.to_string()))?,
        blood_type: blood
            .parse()
            .map_err(|_| ParseErrorKind::BloodType(blood.to_string()))?,
        location: record[3].to_string(),
        contact: record[4].to_string(),
    })
}

/// A lazy, fail-fast sequence of the donors in a donor collection.
///
/// Rows are parsed as the iterator advances, in storage order. The first
/// malformed row is yielded as an error and ends the sequence.
pub struct DonorRecords {
    path: PathBuf,
    records: csv::StringRecordsIntoIter<File>,
    failed: bool,
}

impl DonorRecords {
    pub(super) fn open(path: &Path) -> Result<Self, StorageError> {
        let file = File::open(path).map_err(|e| StorageError::io(path, e))?;
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| StorageError::from_csv(path, e))?;
        if !headers.iter().map(str::trim).eq(DONOR_FIELDS) {
            let found = headers.iter().collect::<Vec<_>>().join(",");
            return Err(ParseError::new(path, 1, ParseErrorKind::Header { found }).into());
        }

        Ok(Self {
            path: path.to_path_buf(),
            records: reader.into_records(),
            failed: false,
        })
    }
}

impl Iterator for DonorRecords {
    type Item = Result<Donor, StorageError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let result = self
            .records
            .next()?
            .map_err(|error| StorageError::from_csv(&self.path, error))
            .and_then(|record| {
                decode_donor(&record).map_err(|kind| {
                    let line = record.position().map_or(0, csv::Position::line);
                    ParseError::new(&self.path, line, kind).into()
                })
            });

        self.failed = result.is_err();
        Some(result)
    }
}
