use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use crate::error::{Error, Result};
use crate::models::{Harvest, Plant};

pub const DEFAULT_DATABASE: &str = "plantsDatabase";
pub const PLANTS: &str = "plants";
pub const HARVESTS: &str = "harvests";

/// Matches the plant with this `_id`.
pub fn plant_filter(id: ObjectId) -> Document {
    doc! { "_id": id }
}

/// Matches every harvest whose `plant_id` references this plant.
pub fn harvests_filter(plant_id: ObjectId) -> Document {
    doc! { "plant_id": plant_id }
}

/// `$set` update overwriting the four mutable plant fields.
pub fn replace_fields(plant: &Plant) -> Document {
    doc! {
        "$set": {
            "name": plant.name.as_str(),
            "variety": plant.variety.as_str(),
            "photo_url": plant.photo_url.as_str(),
            "date_planted": plant.date_planted.as_str(),
        }
    }
}

/// What a cascade delete removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteSummary {
    pub plants: u64,
    pub harvests: u64,
}

/// Data access used by the request handlers.
///
/// Every method maps to one or two document-store calls. Results are
/// returned as the store reports them; nothing is retried.
#[async_trait]
pub trait PlantStore: Send + Sync {
    /// All plants in natural store order.
    async fn list_plants(&self) -> Result<Vec<Plant>>;

    /// Fails with [`Error::NotFound`] when no plant has this id.
    async fn find_plant(&self, id: ObjectId) -> Result<Plant>;

    async fn insert_plant(&self, plant: Plant) -> Result<ObjectId>;

    /// Overwrites all four mutable fields. An unknown id updates nothing.
    async fn update_plant(&self, id: ObjectId, plant: Plant) -> Result<()>;

    /// Deletes the plant, then every harvest referencing it.
    async fn delete_plant(&self, id: ObjectId) -> Result<DeleteSummary>;

    async fn insert_harvest(&self, harvest: Harvest) -> Result<ObjectId>;

    async fn harvests_for(&self, plant_id: ObjectId) -> Result<Vec<Harvest>>;
}

pub struct MongoStore {
    plants: Collection<Plant>,
    harvests: Collection<Harvest>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            plants: db.collection::<Plant>(PLANTS),
            harvests: db.collection::<Harvest>(HARVESTS),
        }
    }

    /// Connects to the database named in `uri` (or [`DEFAULT_DATABASE`]) and
    /// pings it so a dead server is reported at startup.
    pub async fn connect(uri: &str) -> Result<Self> {
        let mut client_options = ClientOptions::parse(uri).await?;
        client_options.server_selection_timeout = Some(Duration::from_secs(10));

        let client = Client::with_options(client_options)?;
        let db = client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE));

        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database = %db.name(), "Connected to MongoDB");

        Ok(Self::new(&db))
    }
}

#[async_trait]
impl PlantStore for MongoStore {
    async fn list_plants(&self) -> Result<Vec<Plant>> {
        let cursor = self.plants.find(doc! {}).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn find_plant(&self, id: ObjectId) -> Result<Plant> {
        self.plants
            .find_one(plant_filter(id))
            .await?
            .ok_or(Error::NotFound {
                collection: PLANTS,
                id,
            })
    }

    async fn insert_plant(&self, plant: Plant) -> Result<ObjectId> {
        let result = self.plants.insert_one(plant).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Error::internal("store returned a non-ObjectId plant id"))
    }

    async fn update_plant(&self, id: ObjectId, plant: Plant) -> Result<()> {
        let result = self
            .plants
            .update_one(plant_filter(id), replace_fields(&plant))
            .await?;
        if result.matched_count == 0 {
            tracing::debug!(plant_id = %id, "Update matched no plant");
        }
        Ok(())
    }

    async fn delete_plant(&self, id: ObjectId) -> Result<DeleteSummary> {
        let plants = self.plants.delete_one(plant_filter(id)).await?;
        let harvests = self.harvests.delete_many(harvests_filter(id)).await?;
        Ok(DeleteSummary {
            plants: plants.deleted_count,
            harvests: harvests.deleted_count,
        })
    }

    async fn insert_harvest(&self, harvest: Harvest) -> Result<ObjectId> {
        let result = self.harvests.insert_one(harvest).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Error::internal("store returned a non-ObjectId harvest id"))
    }

    async fn harvests_for(&self, plant_id: ObjectId) -> Result<Vec<Harvest>> {
        let cursor = self.harvests.find(harvests_filter(plant_id)).await?;
        Ok(cursor.try_collect().await?)
    }
}
