use clap::{Args, Subcommand};

#[derive(Clone, Debug, Subcommand)]
pub enum CustomerCommands {
    /// List your customers.
    List(ListArgs),
    /// Register a customer.
    Create(CustomerCreateArgs),
}

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Max results to return.
    #[arg(short, long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct CustomerCreateArgs {
    /// Razão social.
    #[arg(long)]
    pub legal_name: String,
    /// CPF or CNPJ, with or without punctuation.
    #[arg(long)]
    pub tax_id: String,
    #[arg(long)]
    pub city: String,
    /// UF.
    #[arg(long)]
    pub state: String,
    #[arg(long, default_value = "")]
    pub street: String,
    #[arg(long, default_value = "")]
    pub number: String,
    #[arg(long)]
    pub complement: Option<String>,
    #[arg(long, default_value = "")]
    pub district: String,
    #[arg(long, default_value = "")]
    pub postal_code: String,
}
