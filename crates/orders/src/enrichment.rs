//! Brazilian address enrichment rules.
//!
//! A sale coming out of the online store may have blank address columns.
//! When the sale ships inside Brazil, the blanks can be recovered from the
//! ViaCEP zip-code registry. Only the rules live here; the actual lookup is
//! an infra gateway.

use serde::{Deserialize, Serialize};

use crate::sale::SaleRecord;

/// Country spellings the upstream store uses for Brazil.
const BRAZIL_VARIANTS: [&str; 2] = ["Brazil", "Brasil"];

/// The four enrichable address columns and their ViaCEP source keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressColumn {
    City,
    State,
    Street,
    Neighborhood,
}

impl AddressColumn {
    pub const ALL: [Self; 4] = [Self::City, Self::State, Self::Street, Self::Neighborhood];

    /// Key under which ViaCEP reports this column.
    pub fn viacep_key(self) -> &'static str {
        match self {
            Self::City => "localidade",
            Self::State => "uf",
            Self::Street => "logradouro",
            Self::Neighborhood => "bairro",
        }
    }

    fn get(self, sale: &SaleRecord) -> Option<&str> {
        match self {
            Self::City => sale.city.as_deref(),
            Self::State => sale.state.as_deref(),
            Self::Street => sale.street.as_deref(),
            Self::Neighborhood => sale.neighborhood.as_deref(),
        }
    }

    fn set(self, sale: &mut SaleRecord, value: String) {
        match self {
            Self::City => sale.city = Some(value),
            Self::State => sale.state = Some(value),
            Self::Street => sale.street = Some(value),
            Self::Neighborhood => sale.neighborhood = Some(value),
        }
    }
}

/// Address payload returned by ViaCEP for a resolvable zip code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ZipAddress {
    #[serde(default)]
    pub localidade: Option<String>,
    #[serde(default)]
    pub uf: Option<String>,
    #[serde(default)]
    pub logradouro: Option<String>,
    #[serde(default)]
    pub bairro: Option<String>,
}

impl ZipAddress {
    fn get(&self, column: AddressColumn) -> Option<&str> {
        match column {
            AddressColumn::City => self.localidade.as_deref(),
            AddressColumn::State => self.uf.as_deref(),
            AddressColumn::Street => self.logradouro.as_deref(),
            AddressColumn::Neighborhood => self.bairro.as_deref(),
        }
    }
}

/// Columns whose value is absent or blank after trimming.
pub fn empty_address_columns(sale: &SaleRecord) -> Vec<AddressColumn> {
    AddressColumn::ALL
        .into_iter()
        .filter(|col| col.get(sale).is_none_or(|v| v.trim().is_empty()))
        .collect()
}

/// Whether the sale's country is one of the recognized spellings of Brazil.
pub fn is_brazilian(sale: &SaleRecord) -> bool {
    sale.country
        .as_deref()
        .is_some_and(|c| BRAZIL_VARIANTS.contains(&c))
}

/// Overwrite exactly the given (previously empty) columns from the lookup
/// result. Columns the lookup itself left out stay as they were.
pub fn fill_empty_columns(sale: &mut SaleRecord, address: &ZipAddress, empty: &[AddressColumn]) {
    for &column in empty {
        if let Some(value) = address.get(column) {
            column.set(sale, value.to_string());
        }
    }
}
