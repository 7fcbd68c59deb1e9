//! Built-in storefront catalog.

use crate::catalog::Product;
use crate::money::{Currency, Money};

fn usd(minor_units: i64) -> Money {
    Money::new(minor_units, Currency::USD)
}

fn pexels(photo: &str) -> String {
    format!(
        "https://images.pexels.com/photos/{photo}?auto=compress&cs=tinysrgb&w=1260&h=750&dpr=2"
    )
}

/// The eight products sold by the storefront.
pub fn storefront_products() -> Vec<Product> {
    vec![
        Product::new("1", "Premium Wireless Headphones", usd(29999))
            .with_description(
                "Experience premium sound quality with our wireless headphones. \
                 Perfect for music lovers who demand the best audio experience.",
            )
            .with_image(pexels("3394650/pexels-photo-3394650.jpeg"))
            .with_category("Audio")
            .with_featured(true)
            .with_rating(4.8)
            .with_stock(10)
            .with_colors(["Black", "White", "Blue"]),
        Product::new("2", "Smart Watch Pro", usd(24999))
            .with_description(
                "Stay connected and track your fitness with our latest smartwatch. \
                 Features include heart rate monitoring, GPS, and water resistance.",
            )
            .with_image(pexels("437037/pexels-photo-437037.jpeg"))
            .with_category("Wearables")
            .with_featured(true)
            .with_rating(4.5)
            .with_stock(15)
            .with_colors(["Black", "Silver", "Rose Gold"]),
        Product::new("3", "Ultra-Slim Laptop", usd(129999))
            .with_description(
                "Powerful yet lightweight laptop for professionals. \
                 Features latest processor, ample storage, and all-day battery life.",
            )
            .with_image(pexels("18105/pexels-photo.jpg"))
            .with_category("Computers")
            .with_rating(4.9)
            .with_stock(5)
            .with_colors(["Silver", "Space Gray"]),
        Product::new("4", "Designer Backpack", usd(8999))
            .with_description(
                "Stylish and functional backpack with multiple compartments. \
                 Perfect for work, school, or travel.",
            )
            .with_image(pexels("934070/pexels-photo-934070.jpeg"))
            .with_category("Accessories")
            .with_rating(4.4)
            .with_stock(20)
            .with_colors(["Black", "Navy", "Olive"]),
        Product::new("5", "Bluetooth Speaker", usd(7999))
            .with_description(
                "Portable Bluetooth speaker with amazing sound quality. \
                 Water-resistant and perfect for outdoor adventures.",
            )
            .with_image(pexels("1279107/pexels-photo-1279107.jpeg"))
            .with_category("Audio")
            .with_featured(true)
            .with_rating(4.3)
            .with_stock(25)
            .with_colors(["Black", "Blue", "Red"]),
        Product::new("6", "Premium Sunglasses", usd(14999))
            .with_description(
                "Designer sunglasses with UV protection. Stylish frames and premium lenses.",
            )
            .with_image(pexels("701877/pexels-photo-701877.jpeg"))
            .with_category("Accessories")
            .with_rating(4.6)
            .with_stock(12)
            .with_colors(["Black", "Tortoise", "Clear"]),
        Product::new("7", "Smart Home Hub", usd(12999))
            .with_description(
                "Control your entire smart home with this hub. \
                 Compatible with all major smart devices.",
            )
            .with_image(pexels("1034812/pexels-photo-1034812.jpeg"))
            .with_category("Smart Home")
            .with_rating(4.2)
            .with_stock(8)
            .with_colors(["White", "Black"]),
        Product::new("8", "Wireless Earbuds", usd(15999))
            .with_description(
                "True wireless earbuds with noise cancellation and superior sound quality.",
            )
            .with_image(pexels("7173096/pexels-photo-7173096.jpeg"))
            .with_category("Audio")
            .with_featured(true)
            .with_rating(4.7)
            .with_stock(18)
            .with_colors(["Black", "White"]),
    ]
}
