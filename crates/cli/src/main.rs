//! # rvinventory-cli
//!
//! Command-line browser for RVTools inventory exports.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rvinventory::{Cluster, DataStore, Host, Inventory, InventoryOptions, VirtualMachine};
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// rvinv - browse an RVTools export
#[derive(Parser)]
#[command(name = "rvinv")]
#[command(author, version, about = "Browse an RVTools inventory export", long_about = None)]
struct Cli {
    /// RVTools workbook, or a directory of RVTools_*.csv files
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Fail early if a required sheet is missing
    #[arg(short = 'c', long = "check")]
    check: bool,

    /// Output format (text, json)
    #[arg(short = 'f', long = "format", default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List cluster names
    Clusters,
    /// List datacenter names
    Datacenters,
    /// List datastore names
    Datastores,
    /// List host names
    Hosts,
    /// List VM names
    Vms,
    /// Show one cluster
    Cluster { name: String },
    /// Show one datastore
    Datastore { name: String },
    /// Show one host
    Host { name: String },
    /// Show one VM
    Vm { name: String },
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON output
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let options = InventoryOptions::default().with_health_check(cli.check);
    let inventory = Inventory::open_with(&cli.file, &options)
        .with_context(|| format!("Failed to open inventory: {}", cli.file.display()))?;

    let value = run(&inventory, &cli.command)?;
    print_value(&value, cli.format)
}

/// Execute a command and return its result as a JSON value.
fn run(inventory: &Inventory, command: &Command) -> Result<Value> {
    let value = match command {
        Command::Clusters => names(inventory.clusters()?.map(|c| c.name().to_string())),
        Command::Datacenters => names(inventory.datacenters()?.map(|d| d.name().to_string())),
        Command::Datastores => names(inventory.datastores()?.map(|d| d.name().to_string())),
        Command::Hosts => names(inventory.hosts()?.map(|h| h.name().to_string())),
        Command::Vms => names(inventory.vms()?.map(|v| v.name().to_string())),
        Command::Cluster { name } => {
            let cluster = inventory.cluster_by_name(name)?;
            serde_json::to_value(ClusterDetails::collect(&cluster)?)?
        }
        Command::Datastore { name } => {
            let datastore = inventory.datastore_by_name(name)?;
            serde_json::to_value(DataStoreDetails::collect(&datastore)?)?
        }
        Command::Host { name } => {
            let host = inventory.host_by_name(name)?;
            serde_json::to_value(HostDetails::collect(&host)?)?
        }
        Command::Vm { name } => {
            let vm = inventory.vm_by_name(name)?;
            serde_json::to_value(VmDetails::collect(&vm)?)?
        }
    };
    Ok(value)
}

fn names(iter: impl Iterator<Item = String>) -> Value {
    Value::Array(iter.map(Value::String).collect())
}

fn entity_names<'a, T: 'a>(items: &'a [T], name: impl Fn(&'a T) -> &'a str) -> Vec<String> {
    items.iter().map(|item| name(item).to_string()).collect()
}

// ===== Detail records =====

#[derive(Serialize)]
struct ClusterDetails {
    name: String,
    datacenter: Option<String>,
    hosts: Vec<String>,
}

impl ClusterDetails {
    fn collect(cluster: &Cluster) -> Result<Self> {
        Ok(Self {
            name: cluster.name().to_string(),
            datacenter: cluster.datacenter()?.map(|d| d.name().to_string()),
            hosts: entity_names(cluster.hosts()?, Host::name),
        })
    }
}

#[derive(Serialize)]
struct DataStoreDetails {
    name: String,
    datastore_type: String,
    version: String,
    naa: String,
    capacity_mb: i64,
    provisioned_mb: i64,
    in_use_mb: i64,
    free_mb: i64,
    free_percent: i64,
    sioc_enabled: bool,
    number_of_vms: i64,
    hosts: Vec<String>,
}

impl DataStoreDetails {
    fn collect(ds: &DataStore) -> Result<Self> {
        Ok(Self {
            name: ds.name().to_string(),
            datastore_type: ds.datastore_type()?,
            version: ds.version()?,
            naa: ds.naa()?,
            capacity_mb: ds.capacity_mb()?,
            provisioned_mb: ds.provisioned_mb()?,
            in_use_mb: ds.in_use_mb()?,
            free_mb: ds.free_mb()?,
            free_percent: ds.free_percent()?,
            sioc_enabled: ds.sioc_enabled()?,
            number_of_vms: ds.number_of_vms()?,
            hosts: entity_names(ds.hosts()?, Host::name),
        })
    }
}

#[derive(Serialize)]
struct HbaSummary {
    device: String,
    hba_type: String,
    status: String,
    model: String,
    wwn: Option<Vec<String>>,
}

#[derive(Serialize)]
struct HostDetails {
    name: String,
    cluster: Option<String>,
    datacenter: Option<String>,
    model: String,
    esx_version: String,
    boot_time: String,
    cpus: i64,
    cores: i64,
    memory_mb: i64,
    cpu_usage_percent: i64,
    memory_usage_percent: i64,
    vms: Vec<String>,
    hbas: Vec<HbaSummary>,
}

impl HostDetails {
    fn collect(host: &Host) -> Result<Self> {
        let hbas = host
            .hbas()?
            .iter()
            .map(|hba| HbaSummary {
                device: hba.device.clone(),
                hba_type: hba.hba_type.clone(),
                status: hba.status.clone(),
                model: hba.model.clone(),
                wwn: hba.wwn(),
            })
            .collect();

        Ok(Self {
            name: host.name().to_string(),
            cluster: host.cluster()?.map(|c| c.name().to_string()),
            datacenter: host.datacenter()?.map(|d| d.name().to_string()),
            model: host.model()?,
            esx_version: host.esx_version()?,
            boot_time: host.boot_time()?.format(TIME_FORMAT).to_string(),
            cpus: host.number_of_cpu()?,
            cores: host.number_of_cores()?,
            memory_mb: host.memory_mb()?,
            cpu_usage_percent: host.cpu_usage_percent()?,
            memory_usage_percent: host.memory_usage_percent()?,
            vms: entity_names(host.vms()?, VirtualMachine::name),
            hbas,
        })
    }
}

#[derive(Serialize)]
struct DiskSummary {
    disk: String,
    capacity_mb: i64,
    datastore: Option<String>,
    thin: bool,
}

#[derive(Serialize)]
struct NetworkSummary {
    adapter: String,
    network: Option<String>,
    connected: bool,
    ip_addresses: Vec<String>,
}

#[derive(Serialize)]
struct PartitionSummary {
    disk: String,
    capacity_mb: i64,
    free_percent: i64,
}

#[derive(Serialize)]
struct VmDetails {
    name: String,
    power_state: String,
    power_on: Option<String>,
    os: String,
    cpus: i64,
    memory_mb: i64,
    host: Option<String>,
    cluster: Option<String>,
    datacenter: Option<String>,
    datastore: Option<String>,
    disks: Vec<DiskSummary>,
    networks: Vec<NetworkSummary>,
    partitions: Vec<PartitionSummary>,
}

impl VmDetails {
    fn collect(vm: &VirtualMachine) -> Result<Self> {
        let disks = vm
            .disks()?
            .iter()
            .map(|disk| DiskSummary {
                disk: disk.disk.clone(),
                capacity_mb: disk.capacity_mb,
                datastore: disk.datastore().map(|d| d.name().to_string()),
                thin: disk.thin,
            })
            .collect();

        // tabvNetwork is optional in older exports
        let networks = match vm.networks() {
            Ok(networks) => networks
                .iter()
                .map(|nic| NetworkSummary {
                    adapter: nic.adapter.clone(),
                    network: nic.network().map(str::to_string),
                    connected: nic.connected,
                    ip_addresses: nic.ip_addresses(),
                })
                .collect(),
            Err(rvinventory::InventoryError::SheetNotFound { name }) => {
                tracing::info!(sheet = %name, "skipping network adapters");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let partitions = vm
            .partitions()?
            .iter()
            .map(|p| PartitionSummary {
                disk: p.disk.clone(),
                capacity_mb: p.capacity_mb,
                free_percent: p.free_percent,
            })
            .collect();

        Ok(Self {
            name: vm.name().to_string(),
            power_state: vm.power_state()?,
            power_on: vm.power_on()?.map(|t| t.format(TIME_FORMAT).to_string()),
            os: vm.os()?,
            cpus: vm.cpus()?,
            memory_mb: vm.memory_mb()?,
            host: vm.host()?.map(|h| h.name().to_string()),
            cluster: vm.cluster()?.map(|c| c.name().to_string()),
            datacenter: vm.datacenter()?.map(|d| d.name().to_string()),
            datastore: vm.datastore()?.map(|d| d.name().to_string()),
            disks,
            networks,
            partitions,
        })
    }
}

// ===== Output =====

/// Print a value in the specified format.
fn print_value(value: &Value, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Text => match value {
            Value::Array(items) => {
                for item in items {
                    println!("{}", format_value(item));
                }
            }
            Value::Object(obj) => {
                for (k, v) in obj {
                    println!("{k}: {}", format_value(v));
                }
            }
            other => println!("{}", format_value(other)),
        },
    }
    Ok(())
}

/// Format a value for text display.
fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => {
            let formatted: Vec<_> = items.iter().map(format_value).collect();
            format!("[{}]", formatted.join(", "))
        }
        Value::Object(obj) => {
            let formatted: Vec<_> = obj
                .iter()
                .map(|(k, v)| format!("{k}: {}", format_value(v)))
                .collect();
            format!("{{{}}}", formatted.join(", "))
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvinventory::{Book, InventoryError, Sheet};
    use serde_json::json;

    fn inventory() -> Inventory {
        let mut book = Book::new();
        book.add_sheet(
            "tabvHost",
            Sheet::from_data(vec![
                vec!["Host", "Cluster", "Datacenter"],
                vec!["esx01", "Prod", "DC1"],
                vec!["esx02", "Prod", "DC1"],
            ]),
        )
        .unwrap();
        Inventory::from_book(book)
    }

    // format_value tests

    #[test]
    fn test_format_value_primitives() {
        assert_eq!(format_value(&Value::Null), "-");
        assert_eq!(format_value(&json!(true)), "true");
        assert_eq!(format_value(&json!(42)), "42");
        assert_eq!(format_value(&json!("esx01")), "esx01");
    }

    #[test]
    fn test_format_value_nested() {
        assert_eq!(format_value(&json!(["a", "b"])), "[a, b]");
        assert_eq!(format_value(&json!([])), "[]");
        assert_eq!(
            format_value(&json!({"device": "vmhba1", "wwn": null})),
            "{device: vmhba1, wwn: -}"
        );
    }

    // CLI parsing tests

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["rvinv", "export.xlsx", "hosts"]);
        assert_eq!(cli.file, PathBuf::from("export.xlsx"));
        assert!(matches!(cli.command, Command::Hosts));
        assert!(!cli.check);
        assert!(matches!(cli.format, OutputFormat::Text));
    }

    #[test]
    fn test_cli_parse_details() {
        let cli = Cli::parse_from(["rvinv", "--check", "-f", "json", "export.xlsx", "vm", "web01"]);
        assert!(cli.check);
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(matches!(cli.command, Command::Vm { name } if name == "web01"));
    }

    #[test]
    fn test_cli_requires_command() {
        assert!(Cli::try_parse_from(["rvinv", "export.xlsx"]).is_err());
    }

    // command tests

    #[test]
    fn test_run_list() {
        let value = run(&inventory(), &Command::Clusters).unwrap();
        assert_eq!(value, json!(["Prod"]));
        let value = run(&inventory(), &Command::Hosts).unwrap();
        assert_eq!(value, json!(["esx01", "esx02"]));
    }

    #[test]
    fn test_run_cluster_details() {
        let value = run(&inventory(), &Command::Cluster { name: "Prod".into() }).unwrap();
        assert_eq!(
            value,
            json!({"name": "Prod", "datacenter": "DC1", "hosts": ["esx01", "esx02"]})
        );
    }

    #[test]
    fn test_run_unknown_host() {
        let err = run(&inventory(), &Command::Host { name: "nope".into() }).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<InventoryError>(),
            Some(InventoryError::ObjectNotFound { .. })
        ));
    }
}
