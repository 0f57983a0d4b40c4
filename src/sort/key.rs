use crate::error::{Error, Result, record_label};
use crate::record::{FieldValue, Number, Record};

/// The sort keys of every record, already checked to be mutually comparable.
pub(super) enum KeyColumn {
    Numbers(Vec<Number>),
    Texts(Vec<String>),
}

/// Pull `key` out of every record.
///
/// Presence is checked across the whole input before types are: the first
/// record decides whether the column is numeric or textual, and every other
/// record must agree. NaN never makes it into a numeric column.
pub(super) fn extract<R: Record>(records: &[R], key: &str) -> Result<KeyColumn> {
    let values = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            record.field(key).ok_or_else(|| Error::MissingField {
                field: key.to_string(),
                record: record_label(index, record.id()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mismatch = |index: usize, found: &FieldValue, expected: &'static str| Error::TypeMismatch {
        field: key.to_string(),
        record: record_label(index, records[index].id()),
        found: found.kind(),
        expected,
    };

    if matches!(values.first(), Some(FieldValue::Text(_))) {
        let texts = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                FieldValue::Text(s) => Ok(s),
                other => Err(mismatch(index, &other, "text")),
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(KeyColumn::Texts(texts));
    }

    let numbers = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            FieldValue::Int(i) => Ok(Number::Int(i)),
            FieldValue::Float(f) if !f.is_nan() => Ok(Number::Float(f)),
            other => Err(mismatch(index, &other, "a number")),
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(KeyColumn::Numbers(numbers))
}
