use crate::domain::records::TransactionRecord;
use crate::error::Result;
use std::io::Write;

/// Writes purchase history as CSV.
///
/// One header row, then one row per record in the order given. Columns follow
/// the record's JSON field names, so `type` holds the vertical.
pub struct TransactionWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TransactionWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_transactions<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a TransactionRecord>,
    ) -> Result<()> {
        for record in records {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use crate::domain::records::NewTransaction;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn test_writer_header_and_rows() {
        let record = TransactionRecord::completed(
            NewTransaction {
                vertical: "vouchers",
                category: "Gift Cards",
                title: "IKEA Gift Card".into(),
                description: "GIFT-AB12-CD34-EF56".into(),
                amount: Money::from_cents(2500),
                currency: "EUR".into(),
            },
            Uuid::nil(),
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
        );

        let mut out = Vec::new();
        TransactionWriter::new(&mut out)
            .write_transactions([&record])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("id,type,category,title,description,amount,currency,date,status")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("00000000-0000-0000-0000-000000000000,vouchers,Gift Cards,"));
        assert!(row.contains(",25.00,EUR,2026-10-19T09:30:00Z,completed"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_writer_empty_history_has_no_rows() {
        let mut out = Vec::new();
        TransactionWriter::new(&mut out)
            .write_transactions(std::iter::empty())
            .unwrap();
        assert!(out.is_empty());
    }
}
