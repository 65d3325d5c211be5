/// The following diagram shows a very high level slimmed down overview of the
/// architecture of the library and how an application might use it.
///
/// Only the traits [`Config`](crate::Config) and [`TallyVaultHandler`](crate::TallyVaultHandler)
/// are expanded to show some of their main associated types.
#[cfg_attr(doc, aquamarine::aquamarine)]
/// ```mermaid
/// graph TB
///     subgraph Counter Service
///         dispatcher[HTTP Dispatcher]
///         app[App]
///     end
///     app-. impl .- config
///     dispatcher-- get / increment / decrement --> keeper
///     subgraph Tally Keeper
///         subgraph config[Config]
///             value[Value]
///             vault_type[Vault]
///         end
///         subgraph keeper[Keeper]
///             slot[per-name slot]-- serializes --> rmw[read-modify-write]
///         end
///         vault_handler>TallyVaultHandler]
///         rmw-- load / save count --> vault_type
///         vault_type --> memory_vault
///         vault_type --> rocksdb_vault
///         memory_vault[InMemoryVault]-. impl .- vault_handler
///         rocksdb_vault[RocksDbVault]-. impl .- vault_handler
///         rocksdb_vault --> rocksdb[RocksDB]
///     end
/// ```
///
/// The application must implement the [`Config`](crate::Config) trait in order to utilize the
/// library: it selects the numeric representation of a count and the vault backend counts are
/// persisted through. The dispatcher is one such application; custom consumers can drive the
/// [`Keeper`](crate::Keeper) directly with their own [`TallyId`](crate::TallyId) types.
pub struct Diagram;
