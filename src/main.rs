// Thin delegating binary.
//
// The actual server assembly lives in the extracted `product-server` crate.
#[actix_rt::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    product_server::run().await
}
