//! In-process [`PlantStore`] that keeps documents in insertion order.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::db::{DeleteSummary, PlantStore, PLANTS};
use crate::error::{Error, Result};
use crate::models::{Harvest, Plant};

#[derive(Default)]
pub struct MemoryStore {
    plants: RwLock<Vec<Plant>>,
    harvests: RwLock<Vec<Harvest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlantStore for MemoryStore {
    async fn list_plants(&self) -> Result<Vec<Plant>> {
        Ok(self.plants.read().await.clone())
    }

    async fn find_plant(&self, id: ObjectId) -> Result<Plant> {
        self.plants
            .read()
            .await
            .iter()
            .find(|p| p.id == Some(id))
            .cloned()
            .ok_or(Error::NotFound {
                collection: PLANTS,
                id,
            })
    }

    async fn insert_plant(&self, mut plant: Plant) -> Result<ObjectId> {
        let id = *plant.id.get_or_insert_with(ObjectId::new);
        self.plants.write().await.push(plant);
        Ok(id)
    }

    async fn update_plant(&self, id: ObjectId, plant: Plant) -> Result<()> {
        let mut plants = self.plants.write().await;
        if let Some(existing) = plants.iter_mut().find(|p| p.id == Some(id)) {
            existing.name = plant.name;
            existing.variety = plant.variety;
            existing.photo_url = plant.photo_url;
            existing.date_planted = plant.date_planted;
        }
        Ok(())
    }

    async fn delete_plant(&self, id: ObjectId) -> Result<DeleteSummary> {
        let mut summary = DeleteSummary::default();

        let mut plants = self.plants.write().await;
        if let Some(pos) = plants.iter().position(|p| p.id == Some(id)) {
            plants.remove(pos);
            summary.plants = 1;
        }
        drop(plants);

        let mut harvests = self.harvests.write().await;
        let before = harvests.len();
        harvests.retain(|h| h.plant_id != id);
        summary.harvests = (before - harvests.len()) as u64;

        Ok(summary)
    }

    async fn insert_harvest(&self, mut harvest: Harvest) -> Result<ObjectId> {
        let id = *harvest.id.get_or_insert_with(ObjectId::new);
        self.harvests.write().await.push(harvest);
        Ok(id)
    }

    async fn harvests_for(&self, plant_id: ObjectId) -> Result<Vec<Harvest>> {
        Ok(self
            .harvests
            .read()
            .await
            .iter()
            .filter(|h| h.plant_id == plant_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HarvestForm, PlantForm};

    fn plant(name: &str, variety: &str) -> Plant {
        Plant::from(PlantForm {
            plant_name: name.to_string(),
            variety: variety.to_string(),
            photo: "http://x/p.jpg".to_string(),
            date_planted: "2024-01-01".to_string(),
        })
    }

    fn harvest(plant_id: ObjectId, amount: &str) -> Harvest {
        Harvest::new(
            plant_id,
            HarvestForm {
                harvested_amount: amount.to_string(),
                date_harvested: "2024-06-01".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = MemoryStore::new();
        let id = store.insert_plant(plant("Tomato", "Roma")).await.unwrap();

        let found = store.find_plant(id).await.unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.name, "Tomato");
        assert_eq!(found.variety, "Roma");
        assert_eq!(found.photo_url, "http://x/p.jpg");
        assert_eq!(found.date_planted, "2024-01-01");
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = store.find_plant(ObjectId::new()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { collection: "plants", .. }));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        store.insert_plant(plant("Tomato", "Roma")).await.unwrap();
        store.insert_plant(plant("Pepper", "Jalapeno")).await.unwrap();

        let names: Vec<_> = store
            .list_plants()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Tomato", "Pepper"]);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let store = MemoryStore::new();
        let id = store.insert_plant(plant("Tomato", "Roma")).await.unwrap();

        let partial = Plant::from(PlantForm {
            plant_name: "Cherry Tomato".to_string(),
            ..PlantForm::default()
        });
        store.update_plant(id, partial).await.unwrap();

        let found = store.find_plant(id).await.unwrap();
        assert_eq!(found.id, Some(id));
        assert_eq!(found.name, "Cherry Tomato");
        assert_eq!(found.variety, "");
        assert_eq!(found.photo_url, "");
        assert_eq!(found.date_planted, "");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_noop() {
        let store = MemoryStore::new();
        store
            .update_plant(ObjectId::new(), plant("Ghost", "None"))
            .await
            .unwrap();
        assert!(store.list_plants().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_harvests_filtered_by_plant() {
        let store = MemoryStore::new();
        let tomato = store.insert_plant(plant("Tomato", "Roma")).await.unwrap();
        let pepper = store.insert_plant(plant("Pepper", "Jalapeno")).await.unwrap();
        store.insert_harvest(harvest(tomato, "3 tomatoes")).await.unwrap();
        store.insert_harvest(harvest(pepper, "5 peppers")).await.unwrap();

        let harvests = store.harvests_for(tomato).await.unwrap();
        assert_eq!(harvests.len(), 1);
        assert_eq!(harvests[0].quantity, "3 tomatoes");
        assert_eq!(harvests[0].plant_id, tomato);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_harvests() {
        let store = MemoryStore::new();
        let tomato = store.insert_plant(plant("Tomato", "Roma")).await.unwrap();
        let pepper = store.insert_plant(plant("Pepper", "Jalapeno")).await.unwrap();
        store.insert_harvest(harvest(tomato, "3 tomatoes")).await.unwrap();
        store.insert_harvest(harvest(tomato, "1 tomato")).await.unwrap();
        store.insert_harvest(harvest(pepper, "5 peppers")).await.unwrap();

        let summary = store.delete_plant(tomato).await.unwrap();
        assert_eq!(summary, DeleteSummary { plants: 1, harvests: 2 });

        assert!(store.find_plant(tomato).await.is_err());
        assert!(store.harvests_for(tomato).await.unwrap().is_empty());
        assert_eq!(store.harvests_for(pepper).await.unwrap().len(), 1);
        assert_eq!(store.list_plants().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_unknown_removes_nothing() {
        let store = MemoryStore::new();
        store.insert_plant(plant("Tomato", "Roma")).await.unwrap();

        let summary = store.delete_plant(ObjectId::new()).await.unwrap();
        assert_eq!(summary, DeleteSummary::default());
        assert_eq!(store.list_plants().await.unwrap().len(), 1);
    }
}
