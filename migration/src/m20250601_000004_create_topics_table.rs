use crate::utils::create_table_migration;
use entity::topics;

create_table_migration!(topics::Entity);
