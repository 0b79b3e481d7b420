//! Sea-ORM entity definitions for the catalog database.

pub mod admins;
pub mod audit_logs;
pub mod carousel_items;
pub mod categories;
pub mod countries;
pub mod product_files;
pub mod products;
pub mod subcategories;
pub mod units;

pub use admins::Entity as Admins;
pub use audit_logs::Entity as AuditLogs;
pub use carousel_items::Entity as CarouselItems;
pub use categories::Entity as Categories;
pub use countries::Entity as Countries;
pub use product_files::Entity as ProductFiles;
pub use products::Entity as Products;
pub use subcategories::Entity as Subcategories;
pub use units::Entity as Units;
