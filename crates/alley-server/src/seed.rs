//! Seed data: categories, showcase accounts and products.
//!
//! All seeded accounts share the password `artisan123`.

use alley_verify::TrustTier;
use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::auth::hash_password;
use crate::models::{ArtistPortfolio, Category, Product, Role, User};
use crate::store::MemStore;

const SEED_PASSWORD: &str = "artisan123";

pub fn seed(store: &MemStore) {
    let password_hash = hash_password(SEED_PASSWORD);

    let paintings = store.create_category(Category::new(
        "Paintings",
        "Original oil, acrylic, and watercolor paintings",
        "paintings",
    ));
    let sculptures = store.create_category(Category::new(
        "Sculptures",
        "Handcrafted sculptures in various materials",
        "sculptures",
    ));
    let crafts = store.create_category(Category::new(
        "Crafts",
        "Unique handmade crafts and decorative items",
        "crafts",
    ));
    store.create_category(Category::new(
        "Photography",
        "Fine art photography prints",
        "photography",
    ));
    store.create_category(Category::new(
        "Digital Art",
        "Digital artwork and NFTs",
        "digital-art",
    ));
    let jewelry = store.create_category(Category::new(
        "Jewelry",
        "Handcrafted jewelry and accessories",
        "jewelry",
    ));

    store.create_user(User {
        id: Uuid::new_v4(),
        name: "Admin User".to_string(),
        email: "admin@artisanalley.com".to_string(),
        password_hash: password_hash.clone(),
        role: Role::Admin,
        verified_status: true,
        email_verified: true,
        otp: None,
        otp_expiry: None,
        artist_portfolio: None,
        created_at: Utc::now(),
    });

    let artist = |name: &str, email: &str, bio: &str, specialty: &str, location: &str| User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.clone(),
        role: Role::Artist,
        verified_status: true,
        email_verified: true,
        otp: None,
        otp_expiry: None,
        artist_portfolio: Some(ArtistPortfolio {
            bio: Some(bio.to_string()),
            specialty: Some(specialty.to_string()),
            location: Some(location.to_string()),
            avatar: None,
        }),
        created_at: Utc::now(),
    };

    let sarthak = store.create_user(artist(
        "Sarthak Jadhav",
        "sarthak@artisanalley.com",
        "Traditional Warli art specialist from Maharashtra creating modern interpretations of ancient tribal art forms",
        "Warli Paintings & Contemporary Art",
        "Pune, Maharashtra",
    ));
    let aditya = store.create_user(artist(
        "Aditya Thete",
        "aditya@artisanalley.com",
        "Contemporary sculptor working with traditional Indian materials like sandalwood and marble",
        "Traditional Indian Sculptures",
        "Mumbai, Maharashtra",
    ));
    let abhishek = store.create_user(artist(
        "Abhishek Patade",
        "abhishek@artisanalley.com",
        "Digital artist blending traditional Madhubani art with modern digital techniques",
        "Digital Madhubani Art",
        "Nagpur, Maharashtra",
    ));
    let shubham = store.create_user(artist(
        "Shubham Pagar",
        "shubham@artisanalley.com",
        "Master craftsman specializing in traditional Kolhapuri leather goods and contemporary accessories",
        "Leather Crafts & Accessories",
        "Kolhapur, Maharashtra",
    ));
    let sakshi = store.create_user(artist(
        "Sakshi Peharkar",
        "sakshi@artisanalley.com",
        "Jewelry designer creating exquisite pieces inspired by traditional Maharashtrian designs",
        "Traditional Indian Jewelry",
        "Aurangabad, Maharashtra",
    ));

    let showcase = |title: &str,
                    description: &str,
                    category_id: Uuid,
                    price: i64,
                    stock: i32,
                    artist_id: Uuid,
                    story: &str,
                    score: f64,
                    dimensions: &str,
                    medium: &str,
                    style: &str| Product {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: description.to_string(),
        category_id,
        price: BigDecimal::from(price),
        stock,
        artist_id,
        images: Vec::new(),
        story: Some(story.to_string()),
        authenticity_status: TrustTier::Verified,
        authenticity_score: Some(score),
        dimensions: Some(dimensions.to_string()),
        medium: Some(medium.to_string()),
        year: Some(2024),
        style: Some(style.to_string()),
        verification_id: Some(alley_verify::mint_verification_id()),
        artist_undertaking: None,
        version: 0,
        created_at: Utc::now(),
    };

    store.create_product(showcase(
        "Traditional Warli Village Life",
        "Authentic Warli painting depicting the harmonious village life with traditional tribal motifs. Hand-painted using natural pigments on handmade paper, celebrating the rich cultural heritage of Maharashtra.",
        paintings.id,
        15999,
        1,
        sarthak.id,
        "Inspired by the ancestral wisdom of Warli tribes, this piece tells the story of community, harvest, and celebration in rural Maharashtra.",
        99.5,
        "18\" x 24\"",
        "Natural Pigments on Handmade Paper",
        "Traditional Warli",
    ));
    store.create_product(showcase(
        "Ganesha Marble Sculpture",
        "Exquisite Lord Ganesha sculpture carved from premium Makrana marble with intricate traditional motifs. Each detail is hand-carved with devotion and artistic mastery.",
        sculptures.id,
        45999,
        1,
        aditya.id,
        "Carved during the auspicious month of Bhadrapada, this sculpture embodies the divine energy and blessings of Lord Ganesha for prosperity and wisdom.",
        98.8,
        "12\" x 8\" x 6\"",
        "Makrana Marble",
        "Traditional Indian",
    ));
    store.create_product(showcase(
        "Digital Madhubani Fish",
        "Contemporary digital interpretation of traditional Madhubani fish motifs, symbolizing fertility and prosperity. Printed on premium canvas with archival inks.",
        paintings.id,
        8999,
        3,
        abhishek.id,
        "Blending ancient Mithila art traditions with modern digital techniques, this piece bridges generations of artistic expression.",
        97.2,
        "16\" x 20\"",
        "Digital Art on Canvas",
        "Digital Madhubani",
    ));
    store.create_product(showcase(
        "Kolhapuri Leather Handbag",
        "Handcrafted premium leather handbag using traditional Kolhapuri techniques. Features intricate embossed patterns and durable brass fittings.",
        crafts.id,
        12999,
        2,
        shubham.id,
        "Crafted using age-old Kolhapuri leather techniques passed down through generations, each bag tells a story of craftsmanship and heritage.",
        99.1,
        "14\" x 10\" x 4\"",
        "Premium Leather, Brass",
        "Traditional Kolhapuri",
    ));
    store.create_product(showcase(
        "Maharashtrian Nath Jewelry",
        "Exquisite traditional nose ring (Nath) inspired by Maharashtrian bridal jewelry. Handcrafted in sterling silver with intricate filigree work and kundan stones.",
        jewelry.id,
        25999,
        1,
        sakshi.id,
        "This piece embodies the grandeur of Maharashtrian bridal tradition, where the Nath symbolizes married bliss and cultural pride.",
        99.8,
        "3\" diameter (adjustable)",
        "Sterling Silver, Kundan, Pearls",
        "Traditional Maharashtrian",
    ));

    tracing::info!("seeded store with demo categories, accounts and products");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ProductFilter;

    #[test]
    fn test_seed_populates_store() {
        let store = MemStore::new();
        seed(&store);

        assert_eq!(store.categories().len(), 6);
        assert_eq!(store.users(Some(Role::Artist)).len(), 5);
        assert_eq!(store.users(Some(Role::Admin)).len(), 1);
        assert_eq!(store.products(&ProductFilter::default()).len(), 5);
    }

    #[test]
    fn test_seeded_products_are_verified_with_auth_ids() {
        let store = MemStore::new();
        seed(&store);

        for product in store.products(&ProductFilter::default()) {
            assert_eq!(product.authenticity_status, TrustTier::Verified);
            assert!(product.authenticity_score.is_some());
            assert!(product
                .verification_id
                .as_deref()
                .is_some_and(|id| id.starts_with("AUTH-")));
        }
    }

    #[test]
    fn test_seeded_accounts_can_authenticate() {
        let store = MemStore::new();
        seed(&store);

        let admin = store.get_user_by_email("admin@artisanalley.com").unwrap();
        assert!(crate::auth::verify_password(SEED_PASSWORD, &admin.password_hash));
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn test_curated_story_artists_are_seeded() {
        let store = MemStore::new();
        seed(&store);

        for name in ["Sarthak Jadhav", "Aditya Thete", "Sakshi Peharkar"] {
            assert!(
                store.users(Some(Role::Artist)).iter().any(|u| u.name == name),
                "missing seeded artist {}",
                name
            );
        }
    }
}
