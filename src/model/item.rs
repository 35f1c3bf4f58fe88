//! Item projections: the long-form [`ProductDetail`] and the short-form [`Product`].
//!
//! Every field of the long form tolerates absence and `null`, so an item missing pieces of its
//! payload still decodes. The short form is a pure projection of the long form.

// self
use crate::{_prelude::*, model::lenient::null_as_default};

/// Short-form item projection returned by the aggregation endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
	/// Item id, e.g. `MLA123456789`.
	pub id: String,
	/// Listing title.
	pub title: String,
	/// Listing price.
	pub price: f64,
	/// Currency id, e.g. `ARS`.
	pub currency: String,
	/// Item condition (`new`, `used`, ...).
	pub condition: String,
	/// Category id.
	pub category: String,
	/// Picture URLs in listing order.
	pub pictures: Vec<String>,
	/// Public listing URL.
	pub permalink: String,
}
impl From<&ProductDetail> for Product {
	fn from(detail: &ProductDetail) -> Self {
		Self {
			id: detail.id.clone(),
			title: detail.title.clone(),
			price: detail.price,
			currency: detail.currency_id.clone(),
			condition: detail.condition.clone(),
			category: detail.category_id.clone(),
			pictures: detail
				.pictures
				.iter()
				.filter(|picture| !picture.url.is_empty())
				.map(|picture| picture.url.clone())
				.collect(),
			permalink: detail.permalink.clone(),
		}
	}
}
impl From<ProductDetail> for Product {
	fn from(detail: ProductDetail) -> Self {
		Self::from(&detail)
	}
}

/// Products aggregated for one marketplace user.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProductsResponse {
	/// Marketplace user id the products belong to.
	pub user_id: String,
	/// Successfully fetched products, at most [`crate::flows::MAX_AGGREGATED_ITEMS`].
	pub products: Vec<Product>,
	/// Number of entries in `products`.
	pub total_products: usize,
}
impl UserProductsResponse {
	/// Builds the aggregate, deriving `total_products` from `products`.
	pub fn new(user_id: impl Into<String>, products: Vec<Product>) -> Self {
		let total_products = products.len();

		Self { user_id: user_id.into(), products, total_products }
	}
}

/// Long-form item projection of the marketplace `items/{id}` payload.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDetail {
	/// Item id.
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	/// Listing title.
	#[serde(deserialize_with = "null_as_default")]
	pub title: String,
	/// Listing price.
	#[serde(deserialize_with = "null_as_default")]
	pub price: f64,
	/// Currency id.
	#[serde(deserialize_with = "null_as_default")]
	pub currency_id: String,
	/// Units available for sale.
	#[serde(deserialize_with = "null_as_default")]
	pub available_quantity: u64,
	/// Units sold.
	#[serde(deserialize_with = "null_as_default")]
	pub sold_quantity: u64,
	/// Item condition.
	#[serde(deserialize_with = "null_as_default")]
	pub condition: String,
	/// Public listing URL.
	#[serde(deserialize_with = "null_as_default")]
	pub permalink: String,
	/// Thumbnail URL.
	#[serde(deserialize_with = "null_as_default")]
	pub thumbnail: String,
	/// Listing pictures.
	#[serde(deserialize_with = "null_as_default")]
	pub pictures: Vec<ProductPicture>,
	/// Listing attributes.
	#[serde(deserialize_with = "null_as_default")]
	pub attributes: Vec<ProductAttribute>,
	/// Shipping options.
	#[serde(deserialize_with = "null_as_default")]
	pub shipping: ProductShipping,
	/// Seller location.
	#[serde(deserialize_with = "null_as_default")]
	pub seller_address: ProductSellerAddress,
	/// Listing status (`active`, `paused`, ...).
	#[serde(deserialize_with = "null_as_default")]
	pub status: String,
	/// Listing type id.
	#[serde(deserialize_with = "null_as_default")]
	pub listing_type_id: String,
	/// Listing start.
	#[serde(with = "time::serde::rfc3339::option")]
	pub start_time: Option<OffsetDateTime>,
	/// Listing end.
	#[serde(with = "time::serde::rfc3339::option")]
	pub end_time: Option<OffsetDateTime>,
	/// Creation timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub date_created: Option<OffsetDateTime>,
	/// Last modification timestamp.
	#[serde(with = "time::serde::rfc3339::option")]
	pub last_updated: Option<OffsetDateTime>,
	/// Listing health score.
	#[serde(deserialize_with = "null_as_default")]
	pub health: f64,
	/// Warranty text.
	#[serde(deserialize_with = "null_as_default")]
	pub warranty: String,
	/// Catalog domain id.
	#[serde(deserialize_with = "null_as_default")]
	pub domain_id: String,
	/// Category id.
	#[serde(deserialize_with = "null_as_default")]
	pub category_id: String,
	/// Seller's marketplace user id.
	#[serde(deserialize_with = "null_as_default")]
	pub seller_id: u64,
	/// Listing variations.
	#[serde(deserialize_with = "null_as_default")]
	pub variations: Vec<ProductVariation>,
}

/// One listing picture.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductPicture {
	/// Picture id.
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	/// Plain HTTP URL.
	#[serde(deserialize_with = "null_as_default")]
	pub url: String,
	/// HTTPS URL.
	#[serde(deserialize_with = "null_as_default")]
	pub secure_url: String,
	/// Rendered size, e.g. `500x375`.
	#[serde(deserialize_with = "null_as_default")]
	pub size: String,
	/// Largest available size.
	#[serde(deserialize_with = "null_as_default")]
	pub max_size: String,
	/// Quality label.
	#[serde(deserialize_with = "null_as_default")]
	pub quality: String,
}

/// Listing attribute such as brand or model.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductAttribute {
	/// Attribute id, e.g. `BRAND`.
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	/// Display name.
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
	/// Selected value id.
	pub value_id: Option<String>,
	/// Selected value label.
	pub value_name: Option<String>,
	/// Value type (`string`, `number_unit`, ...).
	#[serde(deserialize_with = "null_as_default")]
	pub value_type: String,
	/// All values attached to the attribute.
	#[serde(deserialize_with = "null_as_default")]
	pub values: Vec<AttributeValue>,
}

/// One value of a [`ProductAttribute`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeValue {
	/// Value id.
	pub id: Option<String>,
	/// Value label.
	pub name: Option<String>,
	/// Numeric value with unit, for measured attributes.
	#[serde(rename = "struct")]
	pub structure: Option<AttributeStruct>,
}

/// Numeric attribute value with its unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeStruct {
	/// Magnitude.
	pub number: Option<f64>,
	/// Unit, e.g. `GB`.
	pub unit: Option<String>,
}

/// Shipping options of a listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductShipping {
	/// Shipping mode, e.g. `me2`.
	#[serde(deserialize_with = "null_as_default")]
	pub mode: String,
	/// Whether shipping is free for the buyer.
	#[serde(deserialize_with = "null_as_default")]
	pub free_shipping: bool,
	/// Whether local pick-up is offered.
	#[serde(deserialize_with = "null_as_default")]
	pub local_pick_up: bool,
	/// Whether store pick-up is offered.
	#[serde(deserialize_with = "null_as_default")]
	pub store_pick_up: bool,
	/// Logistic type, e.g. `drop_off`.
	#[serde(deserialize_with = "null_as_default")]
	pub logistic_type: String,
}

/// Seller address attached to a listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductSellerAddress {
	/// Free-form comment.
	#[serde(deserialize_with = "null_as_default")]
	pub comment: String,
	/// Street line.
	#[serde(deserialize_with = "null_as_default")]
	pub address_line: String,
	/// Postal code.
	#[serde(deserialize_with = "null_as_default")]
	pub zip_code: String,
	/// City.
	#[serde(deserialize_with = "null_as_default")]
	pub city: ProductLocation,
	/// State or province.
	#[serde(deserialize_with = "null_as_default")]
	pub state: ProductLocation,
	/// Country.
	#[serde(deserialize_with = "null_as_default")]
	pub country: ProductLocation,
	/// Latitude.
	#[serde(deserialize_with = "null_as_default")]
	pub latitude: f64,
	/// Longitude.
	#[serde(deserialize_with = "null_as_default")]
	pub longitude: f64,
}

/// Id and display name of a place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductLocation {
	/// Place id.
	#[serde(deserialize_with = "null_as_default")]
	pub id: String,
	/// Display name.
	#[serde(deserialize_with = "null_as_default")]
	pub name: String,
}

/// Variation of a listing (size, color, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductVariation {
	/// Variation id.
	#[serde(deserialize_with = "null_as_default")]
	pub id: u64,
	/// Variation price.
	#[serde(deserialize_with = "null_as_default")]
	pub price: f64,
	/// Units available for sale.
	#[serde(deserialize_with = "null_as_default")]
	pub available_quantity: u64,
	/// Units sold.
	#[serde(deserialize_with = "null_as_default")]
	pub sold_quantity: u64,
	/// Attribute values that define the variation.
	#[serde(deserialize_with = "null_as_default")]
	pub attribute_combinations: Vec<ProductAttribute>,
	/// Ids of the pictures that belong to the variation.
	#[serde(deserialize_with = "null_as_default")]
	pub picture_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::model::decode_strict;

	const ITEM: &[u8] = br#"{
		"id": "MLA123456789",
		"site_id": "MLA",
		"title": "iPhone 14 Pro Max 256GB",
		"seller_id": 123456789,
		"category_id": "MLA1055",
		"price": 1500000,
		"currency_id": "ARS",
		"available_quantity": 5,
		"sold_quantity": null,
		"condition": "new",
		"permalink": "https://articulo.mercadolibre.com.ar/MLA123456789",
		"pictures": [
			{"id": "123456-MLA", "url": "http://http2.mlstatic.com/D_123456-O.jpg", "secure_url": "https://http2.mlstatic.com/D_123456-O.jpg", "size": "500x375"},
			{"id": "654321-MLA", "url": null}
		],
		"attributes": [
			{"id": "INTERNAL_MEMORY", "name": "Memoria interna", "value_id": null, "value_name": "256 GB", "value_type": "number_unit",
			 "values": [{"id": null, "name": "256 GB", "struct": {"number": 256, "unit": "GB"}}]}
		],
		"shipping": {"mode": "me2", "free_shipping": true},
		"seller_address": null,
		"date_created": "2023-03-14T10:20:30.000Z",
		"last_updated": null,
		"health": null,
		"variations": []
	}"#;

	#[test]
	fn detail_decodes_partial_payload() {
		let detail: ProductDetail =
			decode_strict("items/{id}", ITEM).expect("Item payload should decode.");

		assert_eq!(detail.id, "MLA123456789");
		assert_eq!(detail.price, 1_500_000.0);
		assert_eq!(detail.sold_quantity, 0);
		assert_eq!(detail.seller_id, 123_456_789);
		assert!(detail.shipping.free_shipping);
		assert!(!detail.shipping.local_pick_up);
		assert_eq!(detail.seller_address, ProductSellerAddress::default());
		assert_eq!(detail.health, 0.0);
		assert!(detail.date_created.is_some());
		assert!(detail.last_updated.is_none());
		assert!(detail.start_time.is_none());

		let value = &detail.attributes[0].values[0];

		assert_eq!(value.name.as_deref(), Some("256 GB"));
		assert_eq!(value.structure.as_ref().and_then(|s| s.number), Some(256.0));
	}

	#[test]
	fn product_projects_detail() {
		let detail: ProductDetail =
			decode_strict("items/{id}", ITEM).expect("Item payload should decode.");
		let product = Product::from(&detail);

		assert_eq!(product.id, "MLA123456789");
		assert_eq!(product.currency, "ARS");
		assert_eq!(product.category, "MLA1055");
		assert_eq!(product.pictures, vec!["http://http2.mlstatic.com/D_123456-O.jpg".to_owned()]);
	}

	#[test]
	fn empty_object_decodes_to_defaults() {
		let detail: ProductDetail =
			decode_strict("items/{id}", b"{}").expect("Empty item should decode.");

		assert_eq!(detail, ProductDetail::default());
	}

	#[test]
	fn product_serializes_camel_case_aggregate() {
		let response = UserProductsResponse::new("123", vec![Product::default(), Product::default()]);
		let value = serde_json::to_value(&response).expect("Aggregate should serialize.");

		assert_eq!(value["userId"], "123");
		assert_eq!(value["totalProducts"], 2);
		assert_eq!(value["products"].as_array().map(Vec::len), Some(2));
	}
}
