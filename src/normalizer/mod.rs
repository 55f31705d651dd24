use crate::models::{Amount, FavoriteEntry, ImageSource, Photo, Property, Status};

pub const CURRENCY_SYMBOL: &str = "₹";
pub const RENT_UNIT: &str = "/month";
pub const NOT_AVAILABLE: &str = "N/A";
pub const PLACEHOLDER_ASSET: &str = "property-placeholder.png";

/// Price ready for display, e.g. `₹15000` + `/month`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceDisplay {
    pub amount: String,
    pub unit: &'static str,
}

impl PriceDisplay {
    fn priced(amount: &Amount, unit: &'static str) -> Self {
        Self {
            amount: format!("{}{}", CURRENCY_SYMBOL, amount),
            unit,
        }
    }

    fn not_available() -> Self {
        Self {
            amount: NOT_AVAILABLE.to_string(),
            unit: "",
        }
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.amount, self.unit)
    }
}

fn present(amount: &Option<Amount>) -> Option<&Amount> {
    amount.as_ref().filter(|a| a.is_present())
}

/// Picks the price to show for a listing.
///
/// Order: sale price for `both`, rent price (per month) for `rent`, sale
/// price for `sale`, then the generic `price`, then `N/A`.
pub fn resolve_price(property: &Property) -> PriceDisplay {
    let sale = present(&property.sale_price);
    let rent = present(&property.rent_price);

    match (property.status, sale, rent) {
        (Some(Status::Both), Some(sale), _) => PriceDisplay::priced(sale, ""),
        (Some(Status::Rent), _, Some(rent)) => PriceDisplay::priced(rent, RENT_UNIT),
        (Some(Status::Sale), Some(sale), _) => PriceDisplay::priced(sale, ""),
        _ => match present(&property.price) {
            Some(price) => PriceDisplay::priced(price, ""),
            None => PriceDisplay::not_available(),
        },
    }
}

/// Turns any photo encoding into something an image view can load.
pub fn resolve_image(photo: Option<&Photo>, asset_host: &str) -> ImageSource {
    match photo {
        Some(Photo::Text(s)) if s.starts_with("data:") => ImageSource::Uri(s.clone()),
        Some(Photo::Text(s)) if s.starts_with("/uploads/") => {
            ImageSource::Uri(format!("{}{}", asset_host.trim_end_matches('/'), s))
        }
        Some(Photo::Text(s)) if s.starts_with("http") => ImageSource::Uri(s.clone()),
        Some(Photo::Object(asset)) => ImageSource::Bundled(asset.clone()),
        _ => ImageSource::Placeholder,
    }
}

/// `id`, then `_id`, then the position in the list being rendered.
pub fn resolve_id(property: &Property, index: usize) -> String {
    property_id(property).unwrap_or_else(|| index.to_string())
}

/// The server-side id, if the record carries one.
pub fn property_id(property: &Property) -> Option<String> {
    property
        .id
        .as_ref()
        .or(property.mongo_id.as_ref())
        .map(|id| id.to_string())
}

pub fn location_line(property: &Property) -> String {
    [&property.address, &property.location, &property.country]
        .into_iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn to_favorite_entry(property: &Property, id: String, asset_host: &str) -> FavoriteEntry {
    let price = resolve_price(property);
    FavoriteEntry {
        id,
        name: property.name.clone(),
        price: price.amount,
        price_unit: price.unit.to_string(),
        image: resolve_image(property.photo.as_ref(), asset_host),
        rating: property.rating.unwrap_or(0.0),
        location: location_line(property),
        status: property.status,
        facilities: property.facilities.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawId;
    use serde_json::json;

    const HOST: &str = "http://10.0.2.2:5000";

    fn property(value: serde_json::Value) -> Property {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_rent_price_has_month_unit() {
        let price = resolve_price(&property(json!({ "status": "rent", "rentPrice": "15000" })));
        assert_eq!(price.amount, "₹15000");
        assert_eq!(price.unit, "/month");
        assert_eq!(price.label(), "₹15000/month");
    }

    #[test]
    fn test_both_shows_sale_price_without_unit() {
        let price = resolve_price(&property(json!({
            "status": "both",
            "salePrice": "2500000",
            "rentPrice": "15000"
        })));
        assert_eq!(price.amount, "₹2500000");
        assert_eq!(price.unit, "");
    }

    #[test]
    fn test_sale_price() {
        let price = resolve_price(&property(json!({ "status": "sale", "salePrice": 4200000 })));
        assert_eq!(price.label(), "₹4200000");
    }

    #[test]
    fn test_generic_price_fallback() {
        // status says rent but only the generic price is filled in
        let price = resolve_price(&property(json!({ "status": "rent", "price": "12000" })));
        assert_eq!(price.label(), "₹12000");

        let price = resolve_price(&property(json!({ "status": "sold", "price": 800000 })));
        assert_eq!(price.label(), "₹800000");

        let price = resolve_price(&property(json!({ "price": "500" })));
        assert_eq!(price.label(), "₹500");
    }

    #[test]
    fn test_both_without_sale_price_falls_back() {
        let price = resolve_price(&property(json!({
            "status": "both",
            "rentPrice": "15000",
            "price": "3000000"
        })));
        assert_eq!(price.label(), "₹3000000");
    }

    #[test]
    fn test_no_price_is_not_available() {
        let price = resolve_price(&property(json!({ "status": "sale" })));
        assert_eq!(price.amount, "N/A");
        assert_eq!(price.unit, "");

        let price = resolve_price(&property(json!({ "status": "rent", "rentPrice": "", "price": 0 })));
        assert_eq!(price.amount, "N/A");
    }

    #[test]
    fn test_image_data_uri_used_directly() {
        let uri = "data:image/jpeg;base64,/9j/4AAQSkZJRg==";
        let photo = Photo::Text(uri.to_string());
        assert_eq!(resolve_image(Some(&photo), HOST), ImageSource::Uri(uri.to_string()));
    }

    #[test]
    fn test_image_upload_path_gets_host() {
        let photo = Photo::Text("/uploads/1700000-villa.jpg".to_string());
        assert_eq!(
            resolve_image(Some(&photo), "http://10.0.2.2:5000/"),
            ImageSource::Uri("http://10.0.2.2:5000/uploads/1700000-villa.jpg".to_string())
        );
    }

    #[test]
    fn test_image_absolute_url_used_directly() {
        let photo = Photo::Text("https://cdn.example.com/a.png".to_string());
        assert_eq!(
            resolve_image(Some(&photo), HOST),
            ImageSource::Uri("https://cdn.example.com/a.png".to_string())
        );
    }

    #[test]
    fn test_image_object_passes_through() {
        let asset = json!({ "testUri": "../assets/images/house1.png" });
        let photo: Photo = serde_json::from_value(asset.clone()).unwrap();
        let resolved = resolve_image(Some(&photo), HOST);
        assert_eq!(resolved, ImageSource::Bundled(asset.as_object().unwrap().clone()));
    }

    #[test]
    fn test_image_anything_else_is_placeholder() {
        assert_eq!(resolve_image(None, HOST), ImageSource::Placeholder);
        let relative = Photo::Text("villa.jpg".to_string());
        assert_eq!(resolve_image(Some(&relative), HOST), ImageSource::Placeholder);
        let number = Photo::Other(json!(7));
        assert_eq!(resolve_image(Some(&number), HOST), ImageSource::Placeholder);
    }

    #[test]
    fn test_image_resolution_is_idempotent() {
        let photo: Photo = serde_json::from_value(json!({ "uri": "https://cdn.example.com/a.png" })).unwrap();
        let once = resolve_image(Some(&photo), HOST);
        let twice = resolve_image(Some(&Photo::from(once.clone())), HOST);
        assert_eq!(once, twice);

        for photo in [
            Photo::Text("/uploads/b.png".to_string()),
            Photo::Text("data:image/png;base64,iVBOR".to_string()),
            Photo::Other(json!(null)),
        ] {
            let once = resolve_image(Some(&photo), HOST);
            let twice = resolve_image(Some(&Photo::from(once.clone())), HOST);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_resolve_id_order() {
        let both = Property {
            id: Some(RawId::from("a")),
            mongo_id: Some(RawId::from("b")),
            ..Default::default()
        };
        assert_eq!(resolve_id(&both, 3), "a");

        let mongo = Property {
            mongo_id: Some(RawId::from("b")),
            ..Default::default()
        };
        assert_eq!(resolve_id(&mongo, 3), "b");
        assert_eq!(resolve_id(&Property::default(), 3), "3");
        assert_eq!(property_id(&Property::default()), None);
    }

    #[test]
    fn test_numeric_id_is_stringified() {
        assert_eq!(resolve_id(&property(json!({ "id": 42 })), 0), "42");
    }

    #[test]
    fn test_location_line_skips_blanks() {
        let p = property(json!({ "address": "12 MG Road", "location": " ", "country": "India" }));
        assert_eq!(location_line(&p), "12 MG Road, India");
        assert_eq!(location_line(&Property::default()), "");
    }

    #[test]
    fn test_favorite_entry() {
        let p = property(json!({
            "_id": "p1",
            "name": "Sea Breeze",
            "status": "rent",
            "rentPrice": 18000,
            "photo": "/uploads/sea.jpg",
            "rating": 4.2,
            "location": "Goa",
            "country": "India",
            "facilities": ["Wifi"]
        }));
        let entry = to_favorite_entry(&p, "p1".to_string(), HOST);
        assert_eq!(entry.id, "p1");
        assert_eq!(entry.name, "Sea Breeze");
        assert_eq!(entry.price, "₹18000");
        assert_eq!(entry.price_unit, "/month");
        assert_eq!(entry.image, ImageSource::Uri(format!("{}/uploads/sea.jpg", HOST)));
        assert_eq!(entry.rating, 4.2);
        assert_eq!(entry.location, "Goa, India");
        assert_eq!(entry.facilities, vec!["Wifi".to_string()]);
    }
}
