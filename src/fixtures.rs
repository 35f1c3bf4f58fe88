//! Canned marketplace data backing the development-only `/user/{userId}` routes.
//!
//! These helpers never call the marketplace. They exist so front-ends can be built against
//! stable shapes before an application is registered; live data is served by the
//! token-authenticated operations on [`crate::flows::MarketplaceClient`].

// self
use crate::model::{MarketplaceUser, Product, UserProductsResponse};

/// Returns a sample profile for `user_id`.
///
/// A non-numeric `user_id` yields id `0`.
pub fn sample_user(user_id: &str) -> MarketplaceUser {
	MarketplaceUser {
		id: user_id.trim().parse().unwrap_or_default(),
		nickname: "usuario_ejemplo".into(),
		first_name: "Juan".into(),
		last_name: "Pérez".into(),
		email: "juan.perez@example.com".into(),
		country_id: "AR".into(),
		site_id: "MLA".into(),
	}
}

/// Returns two sample products attributed to `user_id`.
pub fn sample_user_products(user_id: &str) -> UserProductsResponse {
	let products = vec![
		Product {
			id: "MLA123456789".into(),
			title: "iPhone 14 Pro Max 256GB".into(),
			price: 1_500_000.0,
			currency: "ARS".into(),
			condition: "new".into(),
			category: "Celulares y Teléfonos".into(),
			pictures: vec!["https://http2.mlstatic.com/D_123456-MLA123456789_123456-O.jpg".into()],
			permalink: "https://articulo.mercadolibre.com.ar/MLA123456789".into(),
		},
		Product {
			id: "MLA987654321".into(),
			title: "MacBook Air M2 13 pulgadas".into(),
			price: 2_500_000.0,
			currency: "ARS".into(),
			condition: "new".into(),
			category: "Computación".into(),
			pictures: vec!["https://http2.mlstatic.com/D_987654-MLA987654321_987654-O.jpg".into()],
			permalink: "https://articulo.mercadolibre.com.ar/MLA987654321".into(),
		},
	];

	UserProductsResponse::new(user_id, products)
}
