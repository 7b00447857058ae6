mod dynamic;
mod extend;
mod hostparse;
