use clap::{Args, Parser, Subcommand};
use vessel_client::DEFAULT_BASE_URL;

#[derive(Parser)]
#[command(name = "vessel", about = "Vessel registry command-line client", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Registry server base URL
    #[arg(long, global = true, env = "VESSEL_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage owners
    #[command(subcommand)]
    Owners(OwnerCommand),
    /// Manage ships and their owner links
    #[command(subcommand)]
    Ships(ShipCommand),
}

#[derive(Subcommand)]
pub enum OwnerCommand {
    /// List all owners
    List,
    /// Show one owner
    Get { id: i64 },
    /// Register an owner
    Create { name: String },
    /// Delete an owner and unlink it from its ships
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ShipCommand {
    /// List all ships
    List,
    /// Show one ship with its owners
    Get { id: i64 },
    /// Register a ship owned by one or more owners
    Create(CreateShipArgs),
    /// Replace the details of a ship
    Update(UpdateShipArgs),
    /// Delete a ship and its owner links
    Delete { id: i64 },
    /// Add an owner to a ship
    Link { ship_id: i64, owner_id: i64 },
    /// Remove an owner from a ship
    Unlink { ship_id: i64, owner_id: i64 },
}

#[derive(Args)]
pub struct ShipFields {
    #[arg(long)]
    pub name: String,
    /// Seven-digit IMO number
    #[arg(long)]
    pub imo: String,
    #[arg(long = "type")]
    pub ship_type: String,
    #[arg(long)]
    pub tonnage: f64,
}

#[derive(Args)]
pub struct CreateShipArgs {
    #[command(flatten)]
    pub fields: ShipFields,
    /// Owner id; repeat for several owners
    #[arg(long = "owner", required = true)]
    pub owner_ids: Vec<i64>,
}

#[derive(Args)]
pub struct UpdateShipArgs {
    pub id: i64,
    #[command(flatten)]
    pub fields: ShipFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ship_create_with_repeated_owners() {
        let cli = Cli::try_parse_from([
            "vessel", "ships", "create", "--name", "X", "--imo", "1234567", "--type", "Cargo",
            "--tonnage", "100", "--owner", "1", "--owner", "2",
        ])
        .unwrap();
        match cli.command {
            Command::Ships(ShipCommand::Create(args)) => {
                assert_eq!(args.owner_ids, vec![1, 2]);
                assert_eq!(args.fields.ship_type, "Cargo");
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vessel", "owners", "list", "--format", "json", "--base-url", "http://h:1",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.base_url, "http://h:1");
    }
}
