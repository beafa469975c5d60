use serde_json::json;
use uuid::Uuid;

use crate::item::{Item, ItemFields, Model};

#[test]
fn item_serializes_flat_with_id() {
    let id = Uuid::new_v4();
    let item = Item::new(id, ItemFields { name: Some("n".into()), desc: Some("d".into()), qty: Some(5.0) });
    let v = serde_json::to_value(&item).unwrap();
    assert_eq!(v["id"], json!(id.to_string()));
    assert_eq!(v["name"], "n");
    assert_eq!(v["desc"], "d");
    assert_eq!(v["qty"], json!(5));
    assert_eq!(v.as_object().unwrap().len(), 4);
}

#[test]
fn whole_qty_is_written_as_integer() {
    let qty = |q: f64| {
        let item = Item::new(Uuid::new_v4(), ItemFields { qty: Some(q), ..Default::default() });
        serde_json::to_value(&item).unwrap()["qty"].clone()
    };
    assert_eq!(serde_json::to_string(&qty(5.0)).unwrap(), "5");
    assert_eq!(qty(-3.0), json!(-3));
    assert_eq!(qty(1.5), json!(1.5));
    assert!(qty(1e20).is_f64());
}

#[test]
fn absent_fields_serialize_as_null() {
    let item = Item::new(Uuid::new_v4(), ItemFields::default());
    let v = serde_json::to_value(&item).unwrap();
    assert!(v["name"].is_null());
    assert!(v["desc"].is_null());
    assert!(v["qty"].is_null());
}

#[test]
fn fields_accept_partial_and_extra_keys() {
    let f: ItemFields = serde_json::from_value(json!({"name": "only", "color": "red"})).unwrap();
    assert_eq!(f, ItemFields { name: Some("only".into()), desc: None, qty: None });

    let f: ItemFields = serde_json::from_value(json!({"qty": -3})).unwrap();
    assert_eq!(f.qty, Some(-3.0));
}

#[test]
fn fields_reject_wrong_types() {
    assert!(serde_json::from_value::<ItemFields>(json!({"qty": "many"})).is_err());
    assert!(serde_json::from_value::<ItemFields>(json!({"name": 12})).is_err());
}

#[test]
fn model_converts_to_item() {
    let id = Uuid::new_v4();
    let m = Model { id, name: Some("a".into()), desc: None, qty: Some(1.5) };
    let item: Item = m.into();
    assert_eq!(item.id, id.to_string());
    assert_eq!(item.fields.name.as_deref(), Some("a"));
    assert_eq!(item.fields.desc, None);
    assert_eq!(item.fields.qty, Some(1.5));
}
