use std::io::Write;

use serde::Serialize;

use crate::domain::{Error, LedgerEntry};

/// Flat CSV shape of a ledger entry; amounts keep two decimals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LedgerRow<'a> {
    at: String,
    #[serde(rename = "type")]
    kind: &'a str,
    description: &'a str,
    amount: String,
    balance_after: String,
    ref_id: &'a str,
}

impl<'a> From<&'a LedgerEntry> for LedgerRow<'a> {
    fn from(entry: &'a LedgerEntry) -> Self {
        Self {
            at: entry.at.to_rfc3339(),
            kind: entry.kind.label(),
            description: &entry.description,
            amount: format!("{:.2}", entry.amount),
            balance_after: entry
                .balance_after
                .map(|b| format!("{b:.2}"))
                .unwrap_or_default(),
            ref_id: &entry.ref_id,
        }
    }
}

/// Writes the entries in the order given, header first.
pub fn write_ledger<W: Write>(entries: &[LedgerEntry], out: W) -> Result<(), Error> {
    let mut writer = csv::Writer::from_writer(out);
    for entry in entries {
        writer.serialize(LedgerRow::from(entry))?;
    }
    writer.flush()?;
    Ok(())
}
