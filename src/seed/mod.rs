use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self},
    path::PathBuf,
};
use thiserror::Error;
use zip::{ZipArchive, read::ZipFile};

mod config;
pub mod models;
pub use config::*;
use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not find file with name: {0}")]
    FileNotFound(String),
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("Train {0} declares stop number {1} more than once")]
    DuplicateStop(String, u32),
    #[error("Train {0} already has a schedule on {1}")]
    DuplicateSchedule(String, NaiveDate),
    #[error("{entity} {id} references unknown {field} {value}")]
    UnknownReference {
        entity: &'static str,
        id: String,
        field: &'static str,
        value: String,
    },
}

/// In-memory seed tables, used to bootstrap a network without a bundle on
/// disk (tests, embedded fixtures).
#[derive(Default, Debug, Clone)]
pub struct Records {
    pub stations: Vec<SeedStation>,
    pub trains: Vec<SeedTrain>,
    pub stops: Vec<SeedStop>,
    pub schedules: Vec<SeedSchedule>,
    pub coach_types: Vec<SeedCoachType>,
    pub coaches: Vec<SeedCoach>,
    pub seats: Vec<SeedSeat>,
}

#[derive(Default)]
pub enum StorageType {
    #[default]
    None,
    Zip(PathBuf),
    Memory(Box<Records>),
}

/// Source of the reference data (stations, trains, stops, schedules,
/// coach types, coaches, seats) a network is built from.
#[derive(Default)]
pub struct Seed {
    config: Config,
    storage: StorageType,
}

impl Seed {
    pub fn new(config: self::Config) -> Self {
        Self {
            config,
            storage: Default::default(),
        }
    }

    pub fn from_zip(mut self, path: PathBuf) -> Self {
        self.storage = StorageType::Zip(path);
        self
    }

    pub fn from_records(mut self, records: Records) -> Self {
        self.storage = StorageType::Memory(Box::new(records));
        self
    }

    pub fn stream_stations<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SeedStation)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                stream_from_zip::<SeedStation, F>(path, &self.config.stations_file_name, f)
            }
            StorageType::Memory(records) => stream_from_memory(&records.stations, f),
        }
    }

    pub fn stream_trains<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SeedTrain)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                stream_from_zip::<SeedTrain, F>(path, &self.config.trains_file_name, f)
            }
            StorageType::Memory(records) => stream_from_memory(&records.trains, f),
        }
    }

    pub fn stream_stops<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SeedStop)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                stream_from_zip::<SeedStop, F>(path, &self.config.stops_file_name, f)
            }
            StorageType::Memory(records) => stream_from_memory(&records.stops, f),
        }
    }

    pub fn stream_schedules<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SeedSchedule)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                stream_from_zip::<SeedSchedule, F>(path, &self.config.schedules_file_name, f)
            }
            StorageType::Memory(records) => stream_from_memory(&records.schedules, f),
        }
    }

    pub fn stream_coach_types<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SeedCoachType)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                stream_from_zip::<SeedCoachType, F>(path, &self.config.coach_types_file_name, f)
            }
            StorageType::Memory(records) => stream_from_memory(&records.coach_types, f),
        }
    }

    pub fn stream_coaches<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SeedCoach)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                stream_from_zip::<SeedCoach, F>(path, &self.config.coaches_file_name, f)
            }
            StorageType::Memory(records) => stream_from_memory(&records.coaches, f),
        }
    }

    pub fn stream_seats<F>(&self, f: F) -> Result<(), self::Error>
    where
        F: FnMut((usize, SeedSeat)),
    {
        match &self.storage {
            StorageType::None => Ok(()),
            StorageType::Zip(path) => {
                stream_from_zip::<SeedSeat, F>(path, &self.config.seats_file_name, f)
            }
            StorageType::Memory(records) => stream_from_memory(&records.seats, f),
        }
    }
}

fn stream_from_zip<T, F>(zip_path: &PathBuf, file_name: &str, mut f: F) -> Result<(), self::Error>
where
    T: DeserializeOwned,
    F: FnMut((usize, T)),
{
    let zip_file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(zip_file)?;
    let file = get_file(&mut archive, file_name)?;
    let mut reader = csv::Reader::from_reader(file);
    for (i, result) in reader.deserialize().enumerate() {
        let record: T = result?;
        f((i, record));
    }
    Ok(())
}

fn stream_from_memory<T, F>(records: &[T], f: F) -> Result<(), self::Error>
where
    T: Clone,
    F: FnMut((usize, T)),
{
    records.iter().cloned().enumerate().for_each(f);
    Ok(())
}

fn get_file<'a>(
    archive: &'a mut ZipArchive<File>,
    name: &'a str,
) -> Result<ZipFile<'a, File>, self::Error> {
    let index = archive
        .index_for_name(name)
        .ok_or(self::Error::FileNotFound(name.to_string()))?;
    let file = archive.by_index(index)?;
    Ok(file)
}
