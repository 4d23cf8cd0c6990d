#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::actor_framework::Change;
    use crate::app_system::{MarketConfig, MarketSystem};
    use crate::auth::{AuthError, SignUp};
    use crate::cart_actor::CartError;
    use crate::catalog::{ProductQuery, SortBy, UNKNOWN_VENDOR};
    use crate::clients::{CartClient, OrderClient, ProductClient, ReviewClient, UserClient};
    use crate::domain::{
        Address, CartItem, Category, Coordinates, FarmerProfile, Order, OrderStatus, Product, ProductCreate,
        ProductPatch, ProductStatus, Profile, Review, Role, StockStatus, User, UserCreate, UserPatch, VendorProfile,
    };
    use crate::mock_framework::{create_mock_client, expect_create, expect_delete, expect_get, expect_list};
    use crate::order_actor::OrderError;
    use crate::product_actor::ProductError;
    use crate::user_actor::UserError;

    fn farmer_user(id: &str) -> User {
        User {
            id: id.to_string(),
            email: format!("{}@farm.in", id),
            role: Role::Farmer,
            name: "Ravi".to_string(),
            phone: Some("9800000001".to_string()),
            address: Some(Address::new("Survey 42", "Temple road", "561203")),
            profile: Profile::Farmer(FarmerProfile::default()),
            created_at: Utc::now(),
        }
    }

    fn cart_line(id: &str, vendor_id: &str, price: f64, quantity: u32) -> CartItem {
        CartItem {
            id: id.to_string(),
            owner_id: "user_1".to_string(),
            product_id: format!("product_of_{}", id),
            vendor_id: vendor_id.to_string(),
            name: format!("Item {}", id),
            price,
            unit: "kg".to_string(),
            minimum_order_quantity: 1,
            max_quantity: 100,
            quantity,
            added_at: Utc::now(),
            updated_at: None,
        }
    }

    struct Mocks {
        order_client: OrderClient,
        user_rx: tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<User>>,
        cart_rx: tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<CartItem>>,
        order_rx: tokio::sync::mpsc::Receiver<crate::actor_framework::ResourceRequest<Order>>,
    }

    fn mocked_order_client() -> Mocks {
        let (user_inner, user_rx) = create_mock_client::<User>(10);
        let (product_inner, _product_rx) = create_mock_client::<Product>(10);
        let (cart_inner, cart_rx) = create_mock_client::<CartItem>(10);
        let (review_inner, _review_rx) = create_mock_client::<Review>(10);
        let (order_inner, order_rx) = create_mock_client::<Order>(10);

        let cart_client = CartClient::new(cart_inner, ProductClient::new(product_inner));
        let order_client = OrderClient::new(
            order_inner,
            UserClient::new(user_inner),
            cart_client,
            ReviewClient::new(review_inner),
        );
        Mocks {
            order_client,
            user_rx,
            cart_rx,
            order_rx,
        }
    }

    #[tokio::test]
    async fn test_checkout_flow_against_mocks() {
        let Mocks {
            order_client,
            mut user_rx,
            mut cart_rx,
            mut order_rx,
        } = mocked_order_client();

        let checkout = tokio::spawn(async move { order_client.place_order("user_1".to_string()).await });

        let (user_id, responder) = expect_get(&mut user_rx).await.expect("Expected User Get");
        assert_eq!(user_id, "user_1");
        responder.send(Ok(Some(farmer_user("user_1")))).unwrap();

        let cart = vec![
            cart_line("cart_1", "v1", 10.0, 2),
            cart_line("cart_2", "v2", 20.0, 1),
            cart_line("cart_3", "v1", 5.0, 1),
        ];
        let (query, responder) = expect_list(&mut cart_rx).await.expect("Expected Cart List");
        assert!(cart.iter().all(|item| query.matches(item)));
        responder.send(Ok(cart.clone())).unwrap();

        let (first, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(first.vendor_id, "v1");
        assert_eq!(first.items.len(), 2);
        assert!((first.total_amount - 25.0).abs() < 1e-9);
        assert_eq!(first.phone, "9800000001");
        responder.send(Ok("order_1".to_string())).unwrap();

        let (second, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(second.vendor_id, "v2");
        assert!((second.total_amount - 20.0).abs() < 1e-9);
        responder.send(Ok("order_2".to_string())).unwrap();

        let (_, responder) = expect_list(&mut cart_rx).await.expect("Expected Cart List before clearing");
        responder.send(Ok(cart.clone())).unwrap();
        for expected in ["cart_1", "cart_2", "cart_3"] {
            let (id, responder) = expect_delete(&mut cart_rx).await.expect("Expected Cart Delete");
            assert_eq!(id, expected);
            responder.send(Ok(())).unwrap();
        }

        let result = checkout.await.unwrap();
        assert_eq!(result, Ok(vec!["order_1".to_string(), "order_2".to_string()]));
    }

    #[tokio::test]
    async fn test_failed_order_write_keeps_cart() {
        let Mocks {
            order_client,
            mut user_rx,
            mut cart_rx,
            mut order_rx,
        } = mocked_order_client();

        let checkout = tokio::spawn(async move { order_client.place_order("user_1".to_string()).await });

        let (_, responder) = expect_get(&mut user_rx).await.unwrap();
        responder.send(Ok(Some(farmer_user("user_1")))).unwrap();
        let (_, responder) = expect_list(&mut cart_rx).await.unwrap();
        responder
            .send(Ok(vec![cart_line("cart_1", "v1", 10.0, 1), cart_line("cart_2", "v2", 10.0, 1)]))
            .unwrap();

        let (_, responder) = expect_create(&mut order_rx).await.unwrap();
        responder.send(Ok("order_1".to_string())).unwrap();
        let (_, responder) = expect_create(&mut order_rx).await.unwrap();
        drop(responder);

        let result = checkout.await.unwrap();
        assert!(matches!(result, Err(OrderError::CheckoutFailed(_))));
        assert!(cart_rx.try_recv().is_err(), "cart must not be touched after a failed write");
    }

    // --- Full system ---

    fn test_system() -> MarketSystem {
        MarketSystem::new(&MarketConfig {
            bcrypt_cost: 4,
            ..MarketConfig::default()
        })
    }

    async fn create_vendor(system: &MarketSystem, name: &str, location: Option<Coordinates>) -> String {
        let mut business_address = Address::new("Market road", "", "560001");
        business_address.coordinates = location;
        system
            .user_client
            .create_user(UserCreate {
                email: format!("{}@store.in", name.to_lowercase()),
                role: Role::Vendor,
                name: name.to_string(),
                phone: Some("9800000002".to_string()),
                address: None,
                profile: Profile::Vendor(VendorProfile {
                    business_name: format!("{} Agro", name),
                    business_hours: "9-6".to_string(),
                    business_address,
                }),
            })
            .await
            .unwrap()
    }

    async fn create_farmer(system: &MarketSystem, with_address: bool) -> String {
        system
            .user_client
            .create_user(UserCreate {
                email: "ravi@farm.in".to_string(),
                role: Role::Farmer,
                name: "Ravi".to_string(),
                phone: Some("9800000001".to_string()),
                address: with_address.then(|| Address::new("Survey 42", "Temple road", "561203")),
                profile: Profile::Farmer(FarmerProfile::default()),
            })
            .await
            .unwrap()
    }

    async fn create_product(system: &MarketSystem, vendor_id: &str, price: f64, stock: u32, minimum: u32) -> String {
        system
            .product_client
            .create_product(ProductCreate {
                vendor_id: vendor_id.to_string(),
                name: format!("Seeds at {}", price),
                brand: "Mahyco".to_string(),
                category: Category::Seeds,
                description: String::new(),
                price_per_unit: price,
                unit: "packet".to_string(),
                quantity: stock,
                minimum_order_quantity: minimum,
                images: Vec::new(),
                status: ProductStatus::Active,
            })
            .await
            .unwrap()
    }

    /// Places a one-line order and returns its id.
    async fn place_single_order(system: &MarketSystem, farmer: &str, product: &str) -> String {
        system
            .cart_client
            .add_to_cart(farmer.to_string(), product.to_string(), 1)
            .await
            .unwrap();
        let mut ids = system.order_client.place_order(farmer.to_string()).await.unwrap();
        assert_eq!(ids.len(), 1);
        ids.remove(0)
    }

    #[tokio::test]
    async fn test_checkout_splits_cart_per_vendor() {
        let system = test_system();
        let v1 = create_vendor(&system, "Meena", None).await;
        let v2 = create_vendor(&system, "Arun", None).await;
        let farmer = create_farmer(&system, true).await;
        let p1 = create_product(&system, &v1, 10.0, 50, 1).await;
        let p2 = create_product(&system, &v2, 20.0, 50, 1).await;
        let p3 = create_product(&system, &v1, 5.0, 50, 1).await;

        let mut changes = system.order_client.watch_orders();
        for (product, qty) in [(&p1, 2), (&p2, 1), (&p3, 1)] {
            system
                .cart_client
                .add_to_cart(farmer.clone(), product.clone(), qty)
                .await
                .unwrap();
        }

        let ids = system.order_client.place_order(farmer.clone()).await.unwrap();
        assert_eq!(ids.len(), 2);
        assert!(system.cart_client.list_cart(farmer.clone()).await.unwrap().is_empty());

        let orders = system.order_client.list_for_farmer(farmer.clone()).await.unwrap();
        let total_for = |vendor: &str| {
            orders
                .iter()
                .find(|o| o.vendor_id == vendor)
                .map(|o| o.total_amount)
                .unwrap()
        };
        assert!((total_for(v1.as_str()) - 25.0).abs() < 1e-9);
        assert!((total_for(v2.as_str()) - 20.0).abs() < 1e-9);
        assert!(orders.iter().all(|o| o.status == OrderStatus::Pending));
        assert!(orders.iter().all(|o| o.shipping_address.pincode == "561203"));

        match changes.recv().await.unwrap() {
            Change::Created(order) => assert_eq!(order.farmer_id, farmer),
            other => panic!("Unexpected change: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_checkout_preconditions() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let product = create_product(&system, &vendor, 10.0, 5, 1).await;
        let farmer = create_farmer(&system, false).await;

        assert_eq!(
            system.order_client.place_order(farmer.clone()).await,
            Err(OrderError::MissingShippingDetails)
        );
        assert_eq!(
            system.order_client.place_order("user_404".to_string()).await,
            Err(OrderError::InvalidUser("user_404".to_string()))
        );

        system
            .cart_client
            .add_to_cart(farmer.clone(), product, 1)
            .await
            .unwrap();
        assert!(system.order_client.place_order(farmer.clone()).await.is_err());
        assert_eq!(system.cart_client.list_cart(farmer).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let system = test_system();
        let farmer = create_farmer(&system, true).await;
        assert_eq!(system.order_client.place_order(farmer).await, Err(OrderError::EmptyCart));
    }

    #[tokio::test]
    async fn test_cart_quantity_bounds() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 10, 2).await;

        assert_eq!(
            system.cart_client.add_to_cart(farmer.clone(), product.clone(), 0).await,
            Err(CartError::ZeroQuantity)
        );
        assert_eq!(
            system.cart_client.add_to_cart(farmer.clone(), product.clone(), 11).await,
            Err(CartError::AboveMaximum { requested: 11, maximum: 10 })
        );
        let item = system.cart_client.add_to_cart(farmer, product, 3).await.unwrap();

        let below = system.cart_client.update_quantity(item.clone(), 1).await;
        assert_eq!(below, Err(CartError::BelowMinimum { requested: 1, minimum: 2 }));
        assert_eq!(below.unwrap_err().to_string(), "Minimum order quantity is 2");
        let above = system.cart_client.update_quantity(item.clone(), 11).await;
        assert_eq!(above.unwrap_err().to_string(), "Maximum available quantity is 10");

        let stored = system.cart_client.get_cart_item(item.clone()).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 3);
        assert!(stored.updated_at.is_none());

        assert_eq!(system.cart_client.update_quantity(item.clone(), 10).await, Ok(10));
        let stored = system.cart_client.get_cart_item(item).await.unwrap().unwrap();
        assert!(stored.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_unlisted_status_jump_is_still_written() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 10, 1).await;
        let order_id = place_single_order(&system, &farmer, &product).await;

        let from = system
            .order_client
            .update_status(order_id.clone(), OrderStatus::Delivered)
            .await
            .unwrap();
        assert_eq!(from, OrderStatus::Pending);

        let order = system.order_client.get_order(order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.delivered_at.is_some());
    }

    #[tokio::test]
    async fn test_review_after_delivery() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 10, 1).await;
        let other = create_product(&system, &vendor, 12.0, 10, 1).await;
        let order_id = place_single_order(&system, &farmer, &product).await;
        system.order_client.confirm_delivery(order_id.clone()).await.unwrap();

        let bad_rating = system
            .order_client
            .submit_review(order_id.clone(), product.clone(), 6, "Too good".into())
            .await;
        assert!(matches!(bad_rating, Err(OrderError::ValidationError(_))));
        let wrong_product = system
            .order_client
            .submit_review(order_id.clone(), other, 4, "Not mine".into())
            .await;
        assert!(matches!(wrong_product, Err(OrderError::ValidationError(_))));

        system
            .order_client
            .submit_review(order_id.clone(), product.clone(), 4, "Good germination".into())
            .await
            .unwrap();
        let order = system.order_client.get_order(order_id).await.unwrap().unwrap();
        assert!(order.reviewed);

        let details = system.catalog_client.product_details(product, None).await.unwrap();
        assert_eq!(details.reviews.len(), 1);
        assert!((details.listing.average_rating - 4.0).abs() < 1e-9);
        assert_eq!(details.listing.vendor_name, "Meena Agro");
    }

    #[tokio::test]
    async fn test_quality_review_marks_delivered() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 10, 1).await;
        let order_id = place_single_order(&system, &farmer, &product).await;

        system
            .order_client
            .submit_quality_review(order_id.clone(), vec!["photo_1.jpg".to_string()])
            .await
            .unwrap();
        let order = system.order_client.get_order(order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.has_quality_issue());
    }

    #[tokio::test]
    async fn test_catalog_sorted_by_distance() {
        let system = test_system();
        let origin = Coordinates::new(12.9716, 77.5946);
        let far = create_vendor(&system, "Far", Some(Coordinates::new(13.9716, 77.5946))).await;
        let unknown = create_vendor(&system, "Nowhere", None).await;
        let near = create_vendor(&system, "Near", Some(Coordinates::new(12.9816, 77.5946))).await;
        let p_far = create_product(&system, &far, 10.0, 5, 1).await;
        let p_unknown = create_product(&system, &unknown, 10.0, 5, 1).await;
        let p_near = create_product(&system, &near, 10.0, 5, 1).await;
        let p_orphan = create_product(&system, "user_404", 10.0, 5, 1).await;

        let listings = system
            .catalog_client
            .list_products(ProductQuery {
                sort: SortBy::Distance,
                origin: Some(origin),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<&str> = listings.iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, vec![p_near.as_str(), p_far.as_str(), p_unknown.as_str(), p_orphan.as_str()]);

        assert!(listings[1].distance_label().unwrap().ends_with(" km away"));
        assert!(listings[2].distance_km.is_none());
        assert_eq!(listings[3].vendor_name, UNKNOWN_VENDOR);

        let machinery = system
            .catalog_client
            .list_products(ProductQuery {
                category: Some(Category::Machinery),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(machinery.is_empty());
    }

    #[tokio::test]
    async fn test_chat_between_farmer_and_vendor() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let chat = &system.chat_client;

        let script = [
            (&farmer, Role::Farmer, &vendor, "Is urea in stock?"),
            (&vendor, Role::Vendor, &farmer, "Yes, 40 bags"),
            (&farmer, Role::Farmer, &vendor, "Sending an order"),
        ];
        for (from, role, to, text) in script {
            chat.send_message(from.clone(), role, to.clone(), text.to_string())
                .await
                .unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let history = chat.room_history(vendor.clone(), farmer.clone()).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].text, "Is urea in stock?");

        let inbox = chat.conversations(vendor.clone()).await.unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].counterparty_id, farmer);
        assert_eq!(inbox[0].unread_count, 2);
        assert_eq!(inbox[0].last_message, "Sending an order");

        assert_eq!(chat.mark_room_read(vendor.clone(), farmer.clone()).await.unwrap(), 2);
        let inbox = chat.conversations(vendor).await.unwrap();
        assert_eq!(inbox[0].unread_count, 0);
    }

    #[tokio::test]
    async fn test_vendor_dashboard_counts_active_orders() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 10, 1).await;
        create_product(&system, &vendor, 15.0, 10, 1).await;

        let first = place_single_order(&system, &farmer, &product).await;
        let second = place_single_order(&system, &farmer, &product).await;
        place_single_order(&system, &farmer, &product).await;
        system
            .order_client
            .update_status(first, OrderStatus::Accepted)
            .await
            .unwrap();
        system
            .order_client
            .update_status(second, OrderStatus::Rejected)
            .await
            .unwrap();

        let stats = system.dashboard_client.vendor_stats(vendor).await.unwrap();
        assert_eq!(stats.total_products, 2);
        assert_eq!(stats.active_orders, 2);
        assert_eq!(stats.total_customers, 1);
        assert!((stats.revenue - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_sign_up_creates_user_document() {
        let system = test_system();
        let session = system
            .auth_client
            .sign_up(SignUp {
                email: "Meena@Store.in".to_string(),
                password: "vendor-pass".to_string(),
                role: Role::Vendor,
                name: "Meena".to_string(),
                phone: None,
                address: None,
                profile: Profile::Vendor(VendorProfile::default()),
            })
            .await
            .unwrap();

        let user = system.user_client.require_user(session.user_id.clone()).await.unwrap();
        assert_eq!(user.email, "meena@store.in");
        assert_eq!(user.role, Role::Vendor);

        let mismatched = system
            .auth_client
            .sign_up(SignUp {
                email: "ravi@farm.in".to_string(),
                password: "farmer-pass".to_string(),
                role: Role::Farmer,
                name: "Ravi".to_string(),
                phone: None,
                address: None,
                profile: Profile::Vendor(VendorProfile::default()),
            })
            .await;
        assert!(matches!(mismatched, Err(AuthError::Profile(_))));
        assert_eq!(system.auth_client.current_session(), Some(session));
    }

    #[tokio::test]
    async fn test_product_edit_rederives_stock() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let product = create_product(&system, &vendor, 10.0, 5, 1).await;
        let mut changes = system.product_client.watch_products();

        let updated = system
            .product_client
            .update_product(
                product.clone(),
                ProductPatch {
                    quantity: Some(0),
                    price_per_unit: Some(12.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.stock_status, StockStatus::OutOfStock);
        match changes.recv().await.unwrap() {
            Change::Updated(p) => assert_eq!(p.stock_status, StockStatus::OutOfStock),
            other => panic!("Unexpected change: {:?}", other),
        }

        let restocked = system
            .product_client
            .update_product(
                product.clone(),
                ProductPatch {
                    quantity: Some(8),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(restocked.stock_status, StockStatus::InStock);
        assert!((restocked.price_per_unit - 12.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_rejected_product_edit_keeps_stored_product() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let product = create_product(&system, &vendor, 10.0, 5, 2).await;

        let rejected = system
            .product_client
            .update_product(
                product.clone(),
                ProductPatch {
                    quantity: Some(0),
                    minimum_order_quantity: Some(0),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(rejected, Err(ProductError::ValidationError(_))));
        let negative = system
            .product_client
            .update_product(
                product.clone(),
                ProductPatch {
                    price_per_unit: Some(-1.0),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(negative, Err(ProductError::ValidationError(_))));

        let stored = system.product_client.require_product(product).await.unwrap();
        assert_eq!(stored.quantity, 5);
        assert_eq!(stored.minimum_order_quantity, 2);
        assert_eq!(stored.stock_status, StockStatus::InStock);
        assert!((stored.price_per_unit - 10.0).abs() < 1e-9);

        assert_eq!(
            system
                .product_client
                .update_product("product_404".to_string(), ProductPatch::default())
                .await,
            Err(ProductError::NotFound("product_404".to_string()))
        );
    }

    #[tokio::test]
    async fn test_unpublished_product_leaves_catalog() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 5, 1).await;

        assert_eq!(
            system.product_client.unpublish(product.clone()).await,
            Ok(ProductStatus::Draft)
        );
        assert!(system
            .catalog_client
            .list_products(ProductQuery::default())
            .await
            .unwrap()
            .is_empty());
        assert_eq!(
            system.cart_client.add_to_cart(farmer.clone(), product.clone(), 1).await,
            Err(CartError::ProductUnavailable(product.clone()))
        );
        assert_eq!(system.product_client.list_by_vendor(vendor).await.unwrap().len(), 1);

        assert_eq!(
            system.product_client.publish(product.clone()).await,
            Ok(ProductStatus::Active)
        );
        let listings = system
            .catalog_client
            .list_products(ProductQuery::default())
            .await
            .unwrap();
        assert_eq!(listings.len(), 1);
        assert!(system.cart_client.add_to_cart(farmer, product, 1).await.is_ok());
    }

    #[tokio::test]
    async fn test_catalog_search_by_name() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let cheap = create_product(&system, &vendor, 10.0, 5, 1).await;
        create_product(&system, &vendor, 20.0, 5, 1).await;

        let listings = system
            .catalog_client
            .list_products(ProductQuery {
                search: Some("SEEDS AT 10".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let ids: Vec<&str> = listings.iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, vec![cheap.as_str()]);
    }

    #[tokio::test]
    async fn test_average_rating_per_product() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 10, 1).await;

        assert_eq!(
            system.review_client.average_for_product(product.clone()).await,
            Ok(0.0)
        );
        for (rating, text) in [(5, "Great"), (2, "Late delivery")] {
            let order_id = place_single_order(&system, &farmer, &product).await;
            system.order_client.confirm_delivery(order_id.clone()).await.unwrap();
            system
                .order_client
                .submit_review(order_id, product.clone(), rating, text.to_string())
                .await
                .unwrap();
        }
        let average = system.review_client.average_for_product(product).await.unwrap();
        assert!((average - 3.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_review_on_pending_order_is_still_written() {
        let system = test_system();
        let vendor = create_vendor(&system, "Meena", None).await;
        let farmer = create_farmer(&system, true).await;
        let product = create_product(&system, &vendor, 10.0, 10, 1).await;
        let order_id = place_single_order(&system, &farmer, &product).await;

        system
            .order_client
            .submit_review(order_id.clone(), product.clone(), 3, "Early".to_string())
            .await
            .unwrap();
        let order = system.order_client.get_order(order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.reviewed);
        assert_eq!(system.review_client.list_for_product(product).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_profile_edit_with_bad_coordinates_is_rejected() {
        let system = test_system();
        let farmer = create_farmer(&system, true).await;

        let moved = system
            .user_client
            .update_user(
                farmer.clone(),
                UserPatch {
                    phone: Some("9800000009".to_string()),
                    profile: Some(Profile::Farmer(FarmerProfile {
                        farm_location: Some(Coordinates::new(13.1, 77.6)),
                        farm_size: "2 acres".to_string(),
                    })),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(moved.phone.as_deref(), Some("9800000009"));

        let rejected = system
            .user_client
            .update_user(
                farmer.clone(),
                UserPatch {
                    name: Some("Ravi K".to_string()),
                    profile: Some(Profile::Farmer(FarmerProfile {
                        farm_location: Some(Coordinates::new(f64::NAN, 77.6)),
                        farm_size: String::new(),
                    })),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(rejected, Err(UserError::ValidationError(_))));

        let stored = system.user_client.require_user(farmer).await.unwrap();
        assert_eq!(stored.name, "Ravi");
        assert_eq!(stored.profile, moved.profile);
    }

    #[tokio::test]
    async fn test_duplicate_email_user_is_rejected() {
        let system = test_system();
        create_farmer(&system, true).await;
        let duplicate = system
            .user_client
            .create_user(UserCreate {
                email: "ravi@farm.in".to_string(),
                role: Role::Farmer,
                name: "Another Ravi".to_string(),
                phone: None,
                address: None,
                profile: Profile::Farmer(FarmerProfile::default()),
            })
            .await;
        assert_eq!(
            duplicate,
            Err(UserError::ValidationError("Email already in use: ravi@farm.in".to_string()))
        );
    }

    #[tokio::test]
    async fn test_shutdown_joins_actors() {
        let system = test_system();
        create_farmer(&system, true).await;
        assert!(system.shutdown().await.is_ok());
    }
}
