use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Office {
    #[serde(rename = "ID")]
    pub id: Option<String>,
    #[serde(rename = "OfficeCode")]
    pub office_code: Option<String>,
    #[serde(rename = "OfficeName")]
    pub office_name: Option<String>,
    #[serde(rename = "OfficeAddress")]
    pub office_address: Option<String>,
    #[serde(rename = "AdminName")]
    pub admin_name: Option<String>,
    #[serde(rename = "AdminMail")]
    pub admin_mail: Option<String>,
    #[serde(rename = "AdminPhone")]
    pub admin_phone: Option<String>,
}

impl Office {
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    pub fn office_code(&self) -> &str {
        self.office_code.as_deref().unwrap_or("")
    }

    pub fn office_name(&self) -> &str {
        self.office_name.as_deref().unwrap_or("")
    }

    pub fn office_address(&self) -> &str {
        self.office_address.as_deref().unwrap_or("")
    }

    pub fn admin_name(&self) -> &str {
        self.admin_name.as_deref().unwrap_or("")
    }

    pub fn admin_mail(&self) -> &str {
        self.admin_mail.as_deref().unwrap_or("")
    }

    pub fn admin_phone(&self) -> &str {
        self.admin_phone.as_deref().unwrap_or("")
    }
}

/// Session fields the login endpoint hands back. The service owns credential
/// verification; this client only trusts what it is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginData {
    #[serde(rename = "OfficeId")]
    pub office_id: String,
    #[serde(rename = "OfficeCode", default)]
    pub office_code: String,
    #[serde(rename = "AdminName", default)]
    pub admin_name: String,
    #[serde(rename = "Role", default)]
    pub role: String,
}
