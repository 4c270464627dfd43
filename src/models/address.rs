use serde::{Deserialize, Serialize};

/// Postal address stored by value on its owner; cloning one is a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub number: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// True when no field carries any text.
    pub fn is_empty(&self) -> bool {
        [
            &self.street,
            &self.number,
            &self.postal_code,
            &self.city,
            &self.country,
        ]
        .iter()
        .all(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()))
    }

    /// Overwrites only the fields that are set on `patch`.
    pub fn merge(&mut self, patch: &Address) {
        if let Some(street) = &patch.street {
            self.street = Some(street.clone());
        }
        if let Some(number) = &patch.number {
            self.number = Some(number.clone());
        }
        if let Some(postal_code) = &patch.postal_code {
            self.postal_code = Some(postal_code.clone());
        }
        if let Some(city) = &patch.city {
            self.city = Some(city.clone());
        }
        if let Some(country) = &patch.country {
            self.country = Some(country.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_fields_absent_from_patch() {
        let mut address = Address {
            street: Some("Rue de la Loi".into()),
            number: Some("16".into()),
            postal_code: Some("1000".into()),
            city: Some("Bruxelles".into()),
            country: Some("Belgique".into()),
        };
        address.merge(&Address {
            number: Some("18".into()),
            ..Address::default()
        });

        assert_eq!(address.number.as_deref(), Some("18"));
        assert_eq!(address.street.as_deref(), Some("Rue de la Loi"));
        assert_eq!(address.city.as_deref(), Some("Bruxelles"));
    }

    #[test]
    fn address_without_text_is_empty() {
        assert!(Address::default().is_empty());
        assert!(Address {
            city: Some("  ".into()),
            ..Address::default()
        }
        .is_empty());
        assert!(!Address {
            country: Some("Belgique".into()),
            ..Address::default()
        }
        .is_empty());
    }
}
