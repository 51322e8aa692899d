use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Employee {
    #[serde(rename = "EmpId")]
    pub emp_id: Option<String>,
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Mail")]
    pub mail: Option<String>,
    #[serde(rename = "OfficeCode")]
    pub office_code: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
}

impl Employee {
    pub fn emp_id(&self) -> &str {
        self.emp_id.as_deref().unwrap_or("")
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn mail(&self) -> &str {
        self.mail.as_deref().unwrap_or("")
    }

    pub fn office_code(&self) -> &str {
        self.office_code.as_deref().unwrap_or("")
    }

    pub fn date(&self) -> &str {
        self.date.as_deref().unwrap_or("")
    }
}
