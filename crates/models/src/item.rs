use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub desc: Option<String>,
    pub qty: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Domain fields of an item, as sent in request bodies.
///
/// Every field is optional; unknown keys are ignored on input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemFields {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default, serialize_with = "serialize_qty")]
    pub qty: Option<f64>,
}

// 整数值按整数输出：5 -> 5，而不是 5.0
fn serialize_qty<S: Serializer>(qty: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    match qty {
        Some(q) if q.fract() == 0.0 && q.abs() <= MAX_EXACT => s.serialize_some(&(*q as i64)),
        Some(q) => s.serialize_some(q),
        None => s.serialize_none(),
    }
}

/// A stored item: store-assigned id plus its fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(flatten)]
    pub fields: ItemFields,
}

impl Item {
    pub fn new(id: Uuid, fields: ItemFields) -> Self {
        Self { id: id.to_string(), fields }
    }
}

impl From<Model> for Item {
    fn from(m: Model) -> Self {
        Item::new(m.id, ItemFields { name: m.name, desc: m.desc, qty: m.qty })
    }
}

pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().all(db).await?)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn create(db: &DatabaseConnection, fields: ItemFields) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(fields.name),
        desc: Set(fields.desc),
        qty: Set(fields.qty),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite every domain column of an existing row. `None` if the row is gone.
pub async fn replace(db: &DatabaseConnection, id: Uuid, fields: ItemFields) -> Result<Option<Model>, errors::ModelError> {
    let Some(existing) = find(db, id).await? else { return Ok(None); };
    let mut am: ActiveModel = existing.into();
    am.name = Set(fields.name);
    am.desc = Set(fields.desc);
    am.qty = Set(fields.qty);
    updated_or_gone(am.update(db).await)
}

/// A row deleted between the lookup and the update is reported as gone.
pub(crate) fn updated_or_gone(res: Result<Model, DbErr>) -> Result<Option<Model>, errors::ModelError> {
    match res {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Delete a row and hand back its last state. `None` if it did not exist.
pub async fn remove(db: &DatabaseConnection, id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    let Some(existing) = find(db, id).await? else { return Ok(None); };
    let res = Entity::delete_by_id(id).exec(db).await?;
    // lost a race with another delete
    if res.rows_affected == 0 {
        return Ok(None);
    }
    Ok(Some(existing))
}
