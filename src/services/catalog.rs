//! Static Catalog
//!
//! Hand-curated hotels, attractions and monuments picked by city name, with
//! a generic fallback for cities the catalog does not know.

use serde::Serialize;
use serde_json::{json, Value};
use uuid::Uuid;

// == Category ==
/// Kind of place a listing holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Hotels,
    Attractions,
    Monuments,
}

impl Category {
    /// Name used as the listing field and in search phrases.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Hotels => "hotels",
            Category::Attractions => "attractions",
            Category::Monuments => "monuments",
        }
    }

    /// Prefix separating this category's cache keys from the others.
    pub fn cache_prefix(&self) -> &'static str {
        match self {
            Category::Hotels => "hotels_",
            Category::Attractions => "attractions_",
            Category::Monuments => "monuments_",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub price: String,
    pub rating: f64,
    pub address: String,
    pub description: String,
    pub image: String,
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Attraction {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub rating: f64,
    pub address: String,
    pub description: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Monument {
    pub id: Uuid,
    pub name: String,
    pub rating: f64,
    pub address: String,
    pub description: String,
    pub image: String,
    pub built_year: String,
    pub architecture: String,
}

const IMG_LUXURY: &str = "https://images.unsplash.com/photo-1566073771259-6a8506099945?w=400";
const IMG_PALACE: &str = "https://images.unsplash.com/photo-1571896349842-33c89424de2d?w=400";
const IMG_BUDGET: &str = "https://images.unsplash.com/photo-1582719478250-c89cae4dc85b?w=400";
const IMG_FORT: &str = "https://images.unsplash.com/photo-1524492412937-b28074a5d7da?w=400";
const IMG_GATE: &str = "https://images.unsplash.com/photo-1587474265384-2d1eef2878f5?w=400";
const IMG_CITY: &str = "https://images.unsplash.com/photo-1578662996442-48f60103fc96?w=400";

// == Listing ==
/// Builds `{ <category>: [...], city, total }` for `city`.
///
/// `city` is expected trimmed; matching is a case-insensitive substring test.
pub fn listing(category: Category, city: &str) -> serde_json::Result<Value> {
    let items = match category {
        Category::Hotels => to_values(hotels(city))?,
        Category::Attractions => to_values(attractions(city))?,
        Category::Monuments => to_values(monuments(city))?,
    };

    let mut body = json!({
        "city": city,
        "total": items.len(),
    });
    body[category.as_str()] = Value::Array(items);
    Ok(body)
}

fn to_values<T: Serialize>(items: Vec<T>) -> serde_json::Result<Vec<Value>> {
    items.into_iter().map(serde_json::to_value).collect()
}

pub fn hotels(city: &str) -> Vec<Hotel> {
    let lower = city.to_lowercase();

    if lower.contains("delhi") {
        vec![
            hotel(
                "Taj Palace Hotel",
                "15000",
                4.8,
                "Sardar Patel Marg, New Delhi",
                "Luxury hotel with world-class amenities and stunning city views.",
                IMG_LUXURY,
                &["WiFi", "Pool", "Spa", "Restaurant", "Gym"],
            ),
            hotel(
                "The Leela Palace",
                "12000",
                4.6,
                "Chanakyapuri, New Delhi",
                "Elegant palace hotel with traditional Indian architecture.",
                IMG_PALACE,
                &["WiFi", "Pool", "Spa", "Restaurant", "Concierge"],
            ),
            hotel(
                "Budget Inn",
                "2500",
                3.5,
                "Main Street, New Delhi",
                "Comfortable budget accommodation in the heart of the city.",
                IMG_BUDGET,
                &["WiFi", "AC", "Restaurant"],
            ),
        ]
    } else if lower.contains("mumbai") {
        vec![
            hotel(
                "Taj Mahal Palace",
                "18000",
                4.9,
                "Apollo Bunder, Mumbai",
                "Historic luxury hotel overlooking the Gateway of India.",
                IMG_LUXURY,
                &["WiFi", "Pool", "Spa", "Restaurant", "Historic"],
            ),
            hotel(
                "The Oberoi Mumbai",
                "16000",
                4.7,
                "Nariman Point, Mumbai",
                "Modern luxury hotel with stunning Arabian Sea views.",
                IMG_PALACE,
                &["WiFi", "Pool", "Spa", "Restaurant", "Sea View"],
            ),
        ]
    } else {
        vec![
            hotel(
                "Grand Hotel",
                "8000",
                4.2,
                &format!("City Center, {}", city),
                &format!("Comfortable hotel in the heart of {}.", city),
                IMG_BUDGET,
                &["WiFi", "AC", "Restaurant"],
            ),
            hotel(
                "Budget Stay",
                "2000",
                3.0,
                &format!("Downtown, {}", city),
                "Affordable accommodation for budget travelers.",
                IMG_PALACE,
                &["WiFi", "AC"],
            ),
        ]
    }
}

pub fn attractions(city: &str) -> Vec<Attraction> {
    let lower = city.to_lowercase();

    if lower.contains("delhi") {
        vec![
            attraction(
                "Red Fort",
                "Historical",
                4.7,
                "Netaji Subhash Marg, New Delhi",
                "A magnificent red sandstone fort built by Mughal emperor Shah Jahan.",
                IMG_FORT,
            ),
            attraction(
                "India Gate",
                "Monument",
                4.5,
                "Rajpath, New Delhi",
                "A war memorial dedicated to the soldiers of the British Indian Army.",
                IMG_GATE,
            ),
            attraction(
                "Lotus Temple",
                "Religious",
                4.6,
                "Kalkaji, New Delhi",
                "A Bahá'í House of Worship known for its flowerlike shape.",
                IMG_CITY,
            ),
        ]
    } else if lower.contains("mumbai") {
        vec![
            attraction(
                "Gateway of India",
                "Monument",
                4.4,
                "Apollo Bunder, Mumbai",
                "An arch-monument built in the early 20th century in Mumbai.",
                IMG_GATE,
            ),
            attraction(
                "Marine Drive",
                "Nature",
                4.3,
                "Marine Drive, Mumbai",
                "A 3.6-kilometre-long boulevard in South Mumbai.",
                IMG_CITY,
            ),
        ]
    } else {
        vec![attraction(
            "City Center",
            "Entertainment",
            4.0,
            &format!("Downtown, {}", city),
            &format!("The main entertainment and shopping area of {}.", city),
            IMG_CITY,
        )]
    }
}

pub fn monuments(city: &str) -> Vec<Monument> {
    let lower = city.to_lowercase();

    if lower.contains("delhi") {
        vec![
            monument(
                "Qutub Minar",
                4.6,
                "Mehrauli, New Delhi",
                "A 73-meter tall minaret built in the 12th century, a UNESCO World Heritage Site.",
                IMG_GATE,
                "1192",
                "Indo-Islamic",
            ),
            monument(
                "Humayun's Tomb",
                4.5,
                "Nizamuddin, New Delhi",
                "The tomb of the Mughal Emperor Humayun, a UNESCO World Heritage Site.",
                IMG_FORT,
                "1572",
                "Mughal",
            ),
        ]
    } else if lower.contains("agra") {
        vec![monument(
            "Taj Mahal",
            4.9,
            "Agra, Uttar Pradesh",
            "An ivory-white marble mausoleum, one of the Seven Wonders of the World.",
            IMG_FORT,
            "1653",
            "Mughal",
        )]
    } else {
        vec![monument(
            "Historic Monument",
            4.0,
            &format!("City Center, {}", city),
            &format!("A significant historical monument in {}.", city),
            IMG_GATE,
            "Unknown",
            "Traditional",
        )]
    }
}

fn hotel(
    name: &str,
    price: &str,
    rating: f64,
    address: &str,
    description: &str,
    image: &str,
    amenities: &[&str],
) -> Hotel {
    Hotel {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price: price.to_string(),
        rating,
        address: address.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

fn attraction(
    name: &str,
    kind: &str,
    rating: f64,
    address: &str,
    description: &str,
    image: &str,
) -> Attraction {
    Attraction {
        id: Uuid::new_v4(),
        name: name.to_string(),
        kind: kind.to_string(),
        rating,
        address: address.to_string(),
        description: description.to_string(),
        image: image.to_string(),
    }
}

fn monument(
    name: &str,
    rating: f64,
    address: &str,
    description: &str,
    image: &str,
    built_year: &str,
    architecture: &str,
) -> Monument {
    Monument {
        id: Uuid::new_v4(),
        name: name.to_string(),
        rating,
        address: address.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        built_year: built_year.to_string(),
        architecture: architecture.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(value: &Value, field: &str) -> Vec<String> {
        value[field]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_delhi_attractions_include_red_fort() {
        let body = listing(Category::Attractions, "Delhi").unwrap();
        assert!(names(&body, "attractions").contains(&"Red Fort".to_string()));
        assert_eq!(body["total"], 3);
        assert_eq!(body["city"], "Delhi");
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        assert_eq!(hotels("NEW DELHI")[0].name, "Taj Palace Hotel");
        assert_eq!(attractions("south mumbai")[0].name, "Gateway of India");
        assert_eq!(monuments("Agra Cantt")[0].name, "Taj Mahal");
    }

    #[test]
    fn test_unknown_city_gets_generic_fallback() {
        let body = listing(Category::Attractions, "Springfield").unwrap();
        let items = body["attractions"].as_array().unwrap();
        assert!(!items.is_empty());
        assert_eq!(items[0]["address"], "Downtown, Springfield");

        assert_eq!(hotels("Springfield").len(), 2);
        assert_eq!(monuments("Springfield")[0].name, "Historic Monument");
    }

    #[test]
    fn test_field_names() {
        let body = listing(Category::Monuments, "Delhi").unwrap();
        let first = &body["monuments"][0];
        assert_eq!(first["builtYear"], "1192");
        assert_eq!(first["architecture"], "Indo-Islamic");

        let body = listing(Category::Attractions, "Mumbai").unwrap();
        assert_eq!(body["attractions"][0]["type"], "Monument");

        let body = listing(Category::Hotels, "Mumbai").unwrap();
        assert_eq!(body["hotels"][0]["amenities"][4], "Historic");
    }

    #[test]
    fn test_serialization_failure_is_reported() {
        use std::collections::HashMap;

        // JSON object keys must be strings
        let unserializable = vec![HashMap::from([((1, 2), "tuple key")])];
        assert!(to_values(unserializable).is_err());
    }

    #[test]
    fn test_each_build_assigns_fresh_ids() {
        let first = hotels("Delhi");
        let second = hotels("Delhi");
        assert_ne!(first[0].id, second[0].id);
    }
}
