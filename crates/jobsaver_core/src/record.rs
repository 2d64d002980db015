use serde::{Deserialize, Serialize};

/// The `{company, role, url}` triple extracted from a job listing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageRecord {
    pub company: String,
    pub role: String,
    pub url: String,
}

/// Editable fields of a [`PageRecord`], in popup form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Role,
    Company,
    Url,
}

impl RecordField {
    pub const ALL: [RecordField; 3] = [RecordField::Role, RecordField::Company, RecordField::Url];

    pub fn label(self) -> &'static str {
        match self {
            RecordField::Role => "Job Role",
            RecordField::Company => "Company",
            RecordField::Url => "Job Url",
        }
    }
}

impl PageRecord {
    pub fn new(
        company: impl Into<String>,
        role: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            company: company.into(),
            role: role.into(),
            url: url.into(),
        }
    }

    pub fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Role => &self.role,
            RecordField::Company => &self.company,
            RecordField::Url => &self.url,
        }
    }

    pub fn set_field(&mut self, field: RecordField, value: impl Into<String>) {
        let value = value.into();
        match field {
            RecordField::Role => self.role = value,
            RecordField::Company => self.company = value,
            RecordField::Url => self.url = value,
        }
    }

    /// Fields that are blank after trimming.
    pub fn missing_fields(&self) -> Vec<RecordField> {
        RecordField::ALL
            .into_iter()
            .filter(|field| self.field(*field).trim().is_empty())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn with_sheet(self, sheet_id: impl Into<String>) -> JobSubmission {
        JobSubmission {
            company: self.company,
            role: self.role,
            url: self.url,
            sheet_id: sheet_id.into(),
        }
    }
}

/// A page record merged with the destination sheet, as sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSubmission {
    pub company: String,
    pub role: String,
    pub url: String,
    #[serde(rename = "sheetId")]
    pub sheet_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_treats_whitespace_as_empty() {
        let record = PageRecord::new("Acme", "  ", "");
        assert_eq!(
            record.missing_fields(),
            vec![RecordField::Role, RecordField::Url]
        );
        assert!(!record.is_complete());
    }

    #[test]
    fn submission_uses_camel_case_sheet_id() {
        let submission = PageRecord::new("Acme", "Engineer", "https://x.test/1").with_sheet("abc");
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "company": "Acme",
                "role": "Engineer",
                "url": "https://x.test/1",
                "sheetId": "abc",
            })
        );
    }
}
