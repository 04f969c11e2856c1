use lex_core::entities::Customer;
use lex_core::input::NewCustomer;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CustomerCommands;
use crate::client::{ApiClient, with_limit};
use crate::output::output;

pub async fn handle(action: &CustomerCommands, flags: &GlobalFlags, client: &ApiClient) -> anyhow::Result<()> {
    match action {
        CustomerCommands::List(args) => {
            let customers: Vec<Customer> = client.get(&with_limit("/api/customers", args.limit)).await?;
            output(&customers, flags.format)
        }
        CustomerCommands::Create(args) => {
            let customer = NewCustomer {
                legal_name: args.legal_name.clone(),
                tax_id: args.tax_id.clone(),
                street: args.street.clone(),
                number: args.number.clone(),
                complement: args.complement.clone(),
                district: args.district.clone(),
                city: args.city.clone(),
                state: args.state.clone(),
                postal_code: args.postal_code.clone(),
            };
            customer.validate()?;
            let created: Customer = client.post("/api/customers", &customer).await?;
            output(&created, flags.format)
        }
    }
}
