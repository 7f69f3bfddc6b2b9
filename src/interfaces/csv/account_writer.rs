use crate::application::engine::AccountReport;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct AccountRow<'a> {
    #[serde(rename = "type")]
    kind: String,
    id: &'a str,
    balance: String,
    apr: String,
    months_open: u32,
}

impl<'a> From<&'a AccountReport> for AccountRow<'a> {
    fn from(account: &'a AccountReport) -> Self {
        Self {
            kind: account.kind.to_string(),
            id: &account.id,
            balance: format!("{:.2}", account.balance),
            apr: format!("{:.2}", account.apr),
            months_open: account.months_open,
        }
    }
}

/// Writes the account table of a report as CSV.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Writes one row per account in report order, header included, then flushes.
    pub fn write_accounts<'a, I>(&mut self, accounts: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a AccountReport>,
    {
        let mut wrote_any = false;
        for account in accounts {
            self.writer.serialize(AccountRow::from(account))?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer
                .write_record(["type", "id", "balance", "apr", "months_open"])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
