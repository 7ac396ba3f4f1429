use crate::utils::create_table_migration;
use entity::table_infos;

create_table_migration!(table_infos::Entity);
