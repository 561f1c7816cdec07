use serde::{Deserialize, Serialize};

/// The business issuing quotes.
///
/// This is read-only configuration handed to the assembler at construction time;
/// it never comes from a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerProfile {
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "cuit")]
    pub tax_id: String,
    #[serde(alias = "direccion")]
    pub address: String,
    pub email: String,
}

impl Default for IssuerProfile {
    fn default() -> Self {
        Self {
            name: "Reconstructora Unión S.A".to_string(),
            tax_id: "30716717565".to_string(),
            address: "Buenos Aires, Olavarría, Av Pellegrini 5900".to_string(),
            email: "olavarria@reconstructoraunion.com".to_string(),
        }
    }
}
