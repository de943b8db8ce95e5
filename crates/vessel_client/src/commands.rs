use crate::cli::{Cli, Command, OutputFormat, OwnerCommand, ShipCommand, ShipFields};
use anyhow::{bail, Result};
use serde::Serialize;
use vessel_client::VesselClient;
use vessel_core::dto::{
    CreateOwnerRequest, CreateShipRequest, OwnerDto, ShipDetailsDto, ShipDto, UpdateShipRequest,
};

pub async fn run_command(cli: Cli) -> Result<()> {
    let client = VesselClient::new(cli.base_url);
    let format = cli.format;
    match cli.command {
        Command::Owners(command) => run_owner_command(&client, command, format).await,
        Command::Ships(command) => run_ship_command(&client, command, format).await,
    }
}

async fn run_owner_command(
    client: &VesselClient,
    command: OwnerCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        OwnerCommand::List => {
            let owners = client.list_owners().await?;
            emit(format, &owners, || {
                owners.iter().map(owner_line).collect::<Vec<_>>().join("\n")
            })
        }
        OwnerCommand::Get { id } => {
            let Some(owner) = client.get_owner(id).await? else {
                bail!("Owner with ID {id} not found.");
            };
            emit(format, &owner, || owner_line(&owner))
        }
        OwnerCommand::Create { name } => {
            let owner = client.create_owner(&CreateOwnerRequest::new(name)).await?;
            emit(format, &owner, || format!("created owner {}", owner_line(&owner)))
        }
        OwnerCommand::Delete { id } => {
            client.delete_owner(id).await?;
            done(format, format!("deleted owner {id}"))
        }
    }
}

async fn run_ship_command(
    client: &VesselClient,
    command: ShipCommand,
    format: OutputFormat,
) -> Result<()> {
    match command {
        ShipCommand::List => {
            let ships = client.list_ships().await?;
            emit(format, &ships, || {
                ships.iter().map(ship_line).collect::<Vec<_>>().join("\n")
            })
        }
        ShipCommand::Get { id } => {
            let Some(details) = client.get_ship_details(id).await? else {
                bail!("Ship with ID {id} not found.");
            };
            emit(format, &details, || details_text(&details))
        }
        ShipCommand::Create(args) => {
            let request = CreateShipRequest {
                name: args.fields.name,
                imo_number: args.fields.imo,
                ship_type: args.fields.ship_type,
                tonnage: args.fields.tonnage,
                owner_ids: args.owner_ids,
            };
            let details = client.create_ship(&request).await?;
            emit(format, &details, || {
                format!("created ship\n{}", details_text(&details))
            })
        }
        ShipCommand::Update(args) => {
            client
                .update_ship(args.id, &update_request(args.fields))
                .await?;
            done(format, format!("updated ship {}", args.id))
        }
        ShipCommand::Delete { id } => {
            client.delete_ship(id).await?;
            done(format, format!("deleted ship {id}"))
        }
        ShipCommand::Link { ship_id, owner_id } => {
            client.link_owner(ship_id, owner_id).await?;
            done(format, format!("linked owner {owner_id} to ship {ship_id}"))
        }
        ShipCommand::Unlink { ship_id, owner_id } => {
            client.unlink_owner(ship_id, owner_id).await?;
            done(format, format!("unlinked owner {owner_id} from ship {ship_id}"))
        }
    }
}

fn update_request(fields: ShipFields) -> UpdateShipRequest {
    UpdateShipRequest {
        name: fields.name,
        imo_number: fields.imo,
        ship_type: fields.ship_type,
        tonnage: fields.tonnage,
    }
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => println!("{}", text()),
    }
    Ok(())
}

fn done(format: OutputFormat, message: String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::json!({ "ok": true, "message": message })),
        OutputFormat::Text => println!("{message}"),
    }
    Ok(())
}

fn owner_line(owner: &OwnerDto) -> String {
    format!("{}\t{}", owner.id, owner.name)
}

fn ship_line(ship: &ShipDto) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        ship.id, ship.name, ship.imo_number, ship.ship_type, ship.tonnage
    )
}

fn details_text(details: &ShipDetailsDto) -> String {
    let mut lines = vec![
        format!("id:       {}", details.id),
        format!("name:     {}", details.name),
        format!("imo:      {}", details.imo_number),
        format!("type:     {}", details.ship_type),
        format!("tonnage:  {}", details.tonnage),
        "owners:".to_string(),
    ];
    lines.extend(
        details
            .owners
            .iter()
            .map(|owner| format!("  {}", owner_line(owner))),
    );
    lines.join("\n")
}
