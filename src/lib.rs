pub mod configuration;

pub mod curve {
    pub mod buckettype;
    pub mod curvebucket;
    pub mod curve;
    pub mod curvedata;
}

pub mod io {
    pub mod curvecsvreader;
    pub mod curvecsvwriter;
    pub mod samplecurvegenerator;
}

pub mod manager {
    pub mod managererror;
    pub mod manager;
}

pub mod time {
    pub mod timeofday;
}
