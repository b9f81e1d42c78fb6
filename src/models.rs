use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub variety: String,
    #[serde(default)]
    pub photo_url: String,
    /// Free text, stored as submitted.
    #[serde(default)]
    pub date_planted: String,
}

impl Plant {
    /// Hex form of the store identifier, empty for a plant not yet inserted.
    pub fn id_hex(&self) -> String {
        self.id.map(|id| id.to_hex()).unwrap_or_default()
    }
}

impl From<PlantForm> for Plant {
    fn from(form: PlantForm) -> Self {
        Plant {
            id: None,
            name: form.plant_name,
            variety: form.variety,
            photo_url: form.photo,
            date_planted: form.date_planted,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Harvest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// Free text with the unit embedded, e.g. "3 tomatoes".
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub date: String,
    pub plant_id: ObjectId,
}

impl Harvest {
    pub fn new(plant_id: ObjectId, form: HarvestForm) -> Self {
        Harvest {
            id: None,
            quantity: form.harvested_amount,
            date: form.date_harvested,
            plant_id,
        }
    }
}

/// Raw urlencoded fields in submission order.
///
/// Forms are never rejected: a missing name reads as empty and a repeated
/// name keeps its first value.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(transparent)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn first(&self, name: &str) -> String {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FormFields(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Fields submitted by the create and edit forms.
#[derive(Debug, Default, Clone)]
pub struct PlantForm {
    pub plant_name: String,
    pub variety: String,
    pub photo: String,
    pub date_planted: String,
}

impl From<FormFields> for PlantForm {
    fn from(fields: FormFields) -> Self {
        PlantForm {
            plant_name: fields.first("plant_name"),
            variety: fields.first("variety"),
            photo: fields.first("photo"),
            date_planted: fields.first("date_planted"),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct HarvestForm {
    pub harvested_amount: String,
    pub date_harvested: String,
}

impl From<FormFields> for HarvestForm {
    fn from(fields: FormFields) -> Self {
        HarvestForm {
            harvested_amount: fields.first("harvested_amount"),
            date_harvested: fields.first("date_harvested"),
        }
    }
}
