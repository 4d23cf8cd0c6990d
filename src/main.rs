use tracing::{error, info, Instrument};

use agri_market::app_system::{setup_tracing, AppError, MarketConfig, MarketSystem};
use agri_market::auth::SignUp;
use agri_market::catalog::{ProductQuery, SortBy};
use agri_market::domain::{
    Address, Category, Coordinates, FarmerProfile, OrderStatus, ProductCreate, ProductStatus, Profile, Role,
    VendorProfile,
};
use agri_market::preferences::PreferenceStore;

/// A vendor lists a product, a farmer buys it, and the order is delivered.
async fn run_walkthrough(system: &MarketSystem) -> Result<(), AppError> {
    let vendor_location = Coordinates::new(12.9716, 77.5946);
    let vendor = system
        .auth_client
        .sign_up(SignUp {
            email: "agro@store.in".to_string(),
            password: "vendor-pass".to_string(),
            role: Role::Vendor,
            name: "Meena".to_string(),
            phone: Some("9800000002".to_string()),
            address: None,
            profile: Profile::Vendor(VendorProfile {
                business_name: "Green Agro Store".to_string(),
                business_hours: "9am - 7pm".to_string(),
                business_address: Address::new("MG Road", "Near bus stand", "560001")
                    .with_coordinates(vendor_location),
            }),
        })
        .await?;

    let product_id = system
        .product_client
        .create_product(ProductCreate {
            vendor_id: vendor.user_id.clone(),
            name: "Urea".to_string(),
            brand: "IFFCO".to_string(),
            category: Category::Fertilizers,
            description: "Nitrogen fertilizer".to_string(),
            price_per_unit: 270.0,
            unit: "bag".to_string(),
            quantity: 40,
            minimum_order_quantity: 2,
            images: Vec::new(),
            status: ProductStatus::Active,
        })
        .await?;
    info!(product_id = %product_id, "Product listed");
    system.auth_client.sign_out();

    let farm_location = Coordinates::new(13.0827, 77.5877);
    let farmer = system
        .auth_client
        .sign_up(SignUp {
            email: "ravi@farm.in".to_string(),
            password: "farmer-pass".to_string(),
            role: Role::Farmer,
            name: "Ravi".to_string(),
            phone: Some("9800000001".to_string()),
            address: Some(Address::new("Survey 42", "Temple road", "561203").with_coordinates(farm_location)),
            profile: Profile::Farmer(FarmerProfile {
                farm_location: Some(farm_location),
                farm_size: "3 acres".to_string(),
            }),
        })
        .await?;

    let listings = system
        .catalog_client
        .list_products(ProductQuery {
            sort: SortBy::Distance,
            origin: Some(farm_location),
            ..Default::default()
        })
        .await?;
    for listing in &listings {
        info!(
            product = %listing.product.name,
            vendor = %listing.vendor_name,
            distance = listing.distance_label().as_deref().unwrap_or("-"),
            "Catalog entry"
        );
    }

    let span = tracing::info_span!("checkout", farmer_id = %farmer.user_id);
    let order_ids = async {
        system
            .cart_client
            .add_to_cart(farmer.user_id.clone(), product_id.clone(), 3)
            .await?;
        Ok::<_, AppError>(system.order_client.place_order(farmer.user_id.clone()).await?)
    }
    .instrument(span)
    .await?;

    for order_id in &order_ids {
        system
            .chat_client
            .send_message(
                farmer.user_id.clone(),
                Role::Farmer,
                vendor.user_id.clone(),
                format!("Please deliver order {} before Friday", order_id),
            )
            .await?;
        for status in [
            OrderStatus::Accepted,
            OrderStatus::Packed,
            OrderStatus::Shipped,
            OrderStatus::OutForDelivery,
        ] {
            system.order_client.update_status(order_id.clone(), status).await?;
        }
        system.order_client.confirm_delivery(order_id.clone()).await?;
        system
            .order_client
            .submit_review(order_id.clone(), product_id.clone(), 5, "Good quality".to_string())
            .await?;
    }

    let stats = system.dashboard_client.vendor_stats(vendor.user_id.clone()).await?;
    info!(?stats, "Vendor dashboard");

    let conversations = system.chat_client.conversations(vendor.user_id).await?;
    info!(conversations = conversations.len(), "Vendor inbox");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = MarketConfig::load().map_err(|e| e.to_string())?;
    info!(?config, "Starting marketplace");

    let preferences = PreferenceStore::open(&config.preferences_path)
        .await
        .map_err(|e| e.to_string())?;
    let language = preferences.language().await;
    info!(language = language.display_name(), "UI language loaded");

    let system = MarketSystem::new(&config);

    let outcome = run_walkthrough(&system).await;

    system.shutdown().await?;

    match outcome {
        Ok(()) => {
            info!("Application completed successfully");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Application finished with errors");
            Err(e.user_message().to_string())
        }
    }
}
