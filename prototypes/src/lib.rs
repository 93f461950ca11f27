use shopgraph_core::config::AppConfig;
use shopgraph_sdk::Session;

/// Session filled to capacity: `max_records` users and products, each user
/// linked to `edges_per_user` products.
pub fn seeded_session(config: &AppConfig, edges_per_user: usize) -> Session {
    let mut session = Session::new(config);
    let count = config.store.max_records;

    for i in 0..count {
        session
            .register(&format!("user{i}"), &format!("user{i}@example.com"), "pw")
            .expect("seed user");
        let category = CATEGORIES[i % CATEGORIES.len()];
        session
            .add_product(
                &format!("SKU-{i:05}"),
                &format!("Product {i} {category}"),
                category,
                (i % 50) as u32,
            )
            .expect("seed product");
    }

    for user in 0..count.min(config.graph.num_vertices) {
        for step in 0..edges_per_user {
            let product = (user * 7 + step * 13) % count;
            session
                .record_interaction(user, &format!("SKU-{product:05}"))
                .expect("seed interaction");
        }
    }

    session
}

const CATEGORIES: [&str; 4] = ["Footwear", "Storage", "Lighting", "Kitchen"];
