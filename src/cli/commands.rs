//! # CLI Commands / CLI 命令
//!
//! - `run` - Executes a sweep described by a configuration file
//! - `init` - Creates a starter configuration file
//!
//! - `run` - 执行配置文件描述的扫描
//! - `init` - 创建初始配置文件

pub mod init;
pub mod run;
