use crate::models::{room::Room, EntityId};

const ROOMS: &[(i64, &str, f64, &str, &str, &[&str])] = &[
    (1, "Luxury Suite", 299.0, "Spacious suite with premium amenities and city view",
        "/assets/luxury_suite.jpg", &["King Bed", "WiFi", "Minibar", "Jacuzzi"]),
    (2, "Family Room", 199.0, "Perfect for families with connecting rooms",
        "/assets/family_room.jpg", &["2 Queen Beds", "WiFi", "Kitchen", "TV"]),
    (3, "Single Room", 99.0, "Cozy room ideal for solo travelers",
        "/assets/single_room.jpg", &["Single Bed", "WiFi", "AC", "Workspace"]),
    (4, "Couple Room", 159.0, "Romantic setting for couples",
        "/assets/couple_room.webp", &["Queen Bed", "WiFi", "Balcony", "Breakfast"]),
    (5, "Deluxe Room", 249.0, "Premium comfort with ocean view",
        "/assets/deluxe_room.jpg", &["King Bed", "WiFi", "Sea View", "Room Service"]),
    (6, "Executive Suite", 349.0, "Business class luxury and comfort",
        "/assets/executive_suite.jpg", &["King Bed", "WiFi", "Office", "Lounge Access"]),
];

/// The rooms the hotel always offers, whatever the store says.
pub fn rooms() -> Vec<Room> {
    ROOMS
        .iter()
        .map(|&(id, title, price, description, image, amenities)| Room {
            id: EntityId::Number(id),
            title: title.to_owned(),
            price,
            description: description.to_owned(),
            image: image.to_owned(),
            amenities: amenities.iter().map(|a| (*a).to_owned()).collect(),
            deleted: false,
        })
        .collect()
}

pub fn find(id: &EntityId) -> Option<Room> {
    rooms().into_iter().find(|room| &room.id == id)
}
